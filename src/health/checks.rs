use super::models::{Dependency, DependencyCheckResult, HealthReport};
use super::probe::{spawn_probe, PROBE_TIMEOUT};
use super::system::SystemStats;
use crate::stores::BackingStores;
use std::time::{Duration, Instant};
use tokio::task::JoinError;

pub struct HealthChecker {
    stores: BackingStores,
    version: String,
    start_time: Instant,
    probe_timeout: Duration,
}

impl HealthChecker {
    pub fn new(stores: BackingStores, version: String) -> Self {
        Self {
            stores,
            version,
            start_time: Instant::now(),
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Probes every store concurrently and waits for all of them. Always
    /// returns a complete report, however many stores are down.
    pub async fn check_all(&self) -> HealthReport {
        let mysql_check = self.spawn(Dependency::MySql);
        let postgres_check = self.spawn(Dependency::Postgres);
        let mongodb_check = self.spawn(Dependency::MongoDb);
        let redis_check = self.spawn(Dependency::Redis);

        let (mysql_result, postgres_result, mongodb_result, redis_result) =
            tokio::join!(mysql_check, postgres_check, mongodb_check, redis_check);

        let results = [
            settle(Dependency::MySql, mysql_result),
            settle(Dependency::Postgres, postgres_result),
            settle(Dependency::MongoDb, mongodb_result),
            settle(Dependency::Redis, redis_result),
        ];

        let report = HealthReport::new(
            self.version.clone(),
            self.start_time.elapsed(),
            SystemStats::collect(),
            results,
        );
        tracing::debug!(status = ?report.overall_status, "Health check finished");

        report
    }

    fn spawn(&self, dependency: Dependency) -> tokio::task::JoinHandle<DependencyCheckResult> {
        spawn_probe(dependency, self.stores.get(dependency), self.probe_timeout)
    }
}

fn settle(
    dependency: Dependency,
    joined: Result<DependencyCheckResult, JoinError>,
) -> DependencyCheckResult {
    joined.unwrap_or_else(|err| {
        tracing::error!("{} probe task failed: {:?}", dependency, err);
        DependencyCheckResult::unhealthy(dependency, format!("probe failed: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::OverallStatus;
    use crate::stores::{Pingable, StoreError};
    use std::sync::Arc;

    struct Stub {
        up: bool,
    }

    #[async_trait::async_trait]
    impl Pingable for Stub {
        async fn ping(&self) -> Result<(), StoreError> {
            if self.up {
                Ok(())
            } else {
                Err(StoreError::Other("connection refused".to_string()))
            }
        }
    }

    struct Panicking;

    #[async_trait::async_trait]
    impl Pingable for Panicking {
        async fn ping(&self) -> Result<(), StoreError> {
            panic!("driver bug")
        }
    }

    struct Slow;

    #[async_trait::async_trait]
    impl Pingable for Slow {
        async fn ping(&self) -> Result<(), StoreError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    fn stub(up: bool) -> Arc<dyn Pingable> {
        Arc::new(Stub { up })
    }

    fn checker(mask: u8) -> HealthChecker {
        let stores = BackingStores::new(
            stub(mask & 0b0001 != 0),
            stub(mask & 0b0010 != 0),
            stub(mask & 0b0100 != 0),
            stub(mask & 0b1000 != 0),
        );
        HealthChecker::new(stores, "1.0.0".to_string())
    }

    #[tokio::test]
    async fn every_combination_of_store_states() {
        for mask in 0u8..16 {
            let report = checker(mask).check_all().await;

            assert_eq!(report.results.len(), 4);
            let expected = if mask == 0b1111 {
                OverallStatus::Healthy
            } else {
                OverallStatus::Degraded
            };
            assert_eq!(report.overall_status, expected, "mask {mask:04b}");

            for (bit, dependency) in Dependency::ALL.iter().enumerate() {
                assert_eq!(report.results[dependency].healthy, mask & (1 << bit) != 0);
            }
        }
    }

    #[tokio::test]
    async fn slow_store_does_not_block_the_report() {
        let stores = BackingStores::new(stub(true), Arc::new(Slow), stub(true), stub(true));
        let checker = HealthChecker::new(stores, "1.0.0".to_string())
            .with_probe_timeout(Duration::from_millis(100));
        let started = Instant::now();

        let report = checker.check_all().await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(report.overall_status, OverallStatus::Degraded);
        assert_eq!(report.results[&Dependency::Postgres].detail, "timeout");
        assert!(report.results[&Dependency::MySql].healthy);
    }

    #[tokio::test]
    async fn panicking_store_is_reported_unhealthy() {
        let stores = BackingStores::new(stub(true), stub(true), stub(true), Arc::new(Panicking));
        let report = HealthChecker::new(stores, "1.0.0".to_string())
            .check_all()
            .await;

        assert_eq!(report.overall_status, OverallStatus::Degraded);
        assert!(!report.results[&Dependency::Redis].healthy);
        assert!(report.results[&Dependency::Redis]
            .detail
            .starts_with("probe failed"));
    }

    #[tokio::test]
    async fn repeated_checks_agree_on_services_and_status() {
        let checker = checker(0b1011);

        let first = checker.check_all().await;
        let second = checker.check_all().await;

        assert_eq!(first.overall_status, second.overall_status);
        assert_eq!(first.results, second.results);
        assert_eq!(first.to_response().services, second.to_response().services);
    }
}
