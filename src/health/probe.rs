use super::models::{Dependency, DependencyCheckResult};
use crate::stores::Pingable;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Per-dependency deadline used by the health endpoint.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Single liveness attempt bounded by `limit`. Every failure is returned as
/// an unhealthy result; nothing is propagated to the caller.
#[tracing::instrument(name = "Probe dependency", skip(store))]
pub async fn probe(
    name: Dependency,
    store: &dyn Pingable,
    limit: Duration,
) -> DependencyCheckResult {
    match timeout(limit, store.ping()).await {
        Ok(Ok(())) => DependencyCheckResult::healthy(name),
        Ok(Err(err)) => {
            tracing::warn!("{} health check failed: {:?}", name, err);
            DependencyCheckResult::unhealthy(name, err.to_string())
        }
        Err(_) => {
            tracing::warn!("{} health check timed out after {:?}", name, limit);
            DependencyCheckResult::unhealthy(name, "timeout")
        }
    }
}

/// Runs [`probe`] on its own task so a panicking store cannot take the
/// aggregator down with it.
pub fn spawn_probe(
    name: Dependency,
    store: Arc<dyn Pingable>,
    limit: Duration,
) -> JoinHandle<DependencyCheckResult> {
    tokio::spawn(async move { probe(name, store.as_ref(), limit).await })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::StoreError;
    use std::time::Instant;

    struct Refusing;

    #[async_trait::async_trait]
    impl Pingable for Refusing {
        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Other("connection refused".to_string()))
        }
    }

    struct Hanging;

    #[async_trait::async_trait]
    impl Pingable for Hanging {
        async fn ping(&self) -> Result<(), StoreError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    struct Answering;

    #[async_trait::async_trait]
    impl Pingable for Answering {
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn answering_store_is_healthy() {
        let result = probe(Dependency::Redis, &Answering, PROBE_TIMEOUT).await;

        assert!(result.healthy);
        assert!(result.detail.is_empty());
    }

    #[tokio::test]
    async fn error_is_captured_as_detail() {
        let result = probe(Dependency::MySql, &Refusing, PROBE_TIMEOUT).await;

        assert!(!result.healthy);
        assert_eq!(result.detail, "connection refused");
    }

    #[tokio::test]
    async fn hanging_store_times_out_within_deadline() {
        let limit = Duration::from_millis(100);
        let started = Instant::now();

        let result = probe(Dependency::MongoDb, &Hanging, limit).await;

        assert!(!result.healthy);
        assert_eq!(result.detail, "timeout");
        assert!(started.elapsed() < limit + Duration::from_millis(500));
    }
}
