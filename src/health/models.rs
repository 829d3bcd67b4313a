use super::system::SystemStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Longest error description carried in a result.
pub const MAX_DETAIL_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    MySql,
    Postgres,
    MongoDb,
    Redis,
}

impl Dependency {
    pub const ALL: [Dependency; 4] = [
        Dependency::MySql,
        Dependency::Postgres,
        Dependency::MongoDb,
        Dependency::Redis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dependency::MySql => "mysql",
            Dependency::Postgres => "postgres",
            Dependency::MongoDb => "mongodb",
            Dependency::Redis => "redis",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCheckResult {
    pub name: Dependency,
    pub healthy: bool,
    pub detail: String,
}

impl DependencyCheckResult {
    pub fn healthy(name: Dependency) -> Self {
        Self {
            name,
            healthy: true,
            detail: String::new(),
        }
    }

    pub fn unhealthy(name: Dependency, detail: impl Into<String>) -> Self {
        Self {
            name,
            healthy: false,
            detail: truncate(detail.into(), MAX_DETAIL_LEN),
        }
    }

    /// `"healthy"` or `"unhealthy: <detail>"`, as reported on the wire.
    pub fn status_line(&self) -> String {
        if self.healthy {
            "healthy".to_string()
        } else {
            format!("unhealthy: {}", self.detail)
        }
    }
}

fn truncate(mut detail: String, max_chars: usize) -> String {
    if let Some((idx, _)) = detail.char_indices().nth(max_chars) {
        detail.truncate(idx);
    }
    detail
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

impl OverallStatus {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a DependencyCheckResult>) -> Self {
        if results.into_iter().all(|result| result.healthy) {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthReport {
    pub overall_status: OverallStatus,
    pub checked_at: DateTime<Utc>,
    pub uptime: Duration,
    pub version: String,
    pub system: SystemStats,
    pub results: BTreeMap<Dependency, DependencyCheckResult>,
}

impl HealthReport {
    pub fn new(
        version: String,
        uptime: Duration,
        system: SystemStats,
        results: impl IntoIterator<Item = DependencyCheckResult>,
    ) -> Self {
        let results: BTreeMap<_, _> = results
            .into_iter()
            .map(|result| (result.name, result))
            .collect();
        let overall_status = OverallStatus::from_results(results.values());

        Self {
            overall_status,
            checked_at: Utc::now(),
            uptime,
            version,
            system,
            results,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.overall_status == OverallStatus::Healthy
    }

    pub fn to_response(&self) -> HealthResponse {
        HealthResponse {
            status: self.overall_status,
            version: self.version.clone(),
            timestamp: self.checked_at,
            uptime: format_uptime(self.uptime),
            system: self.system.clone(),
            services: self
                .results
                .iter()
                .map(|(name, result)| (name.as_str().to_string(), result.status_line()))
                .collect(),
        }
    }
}

/// JSON document served by the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: OverallStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: String,
    pub system: SystemStats,
    pub services: BTreeMap<String, String>,
}

/// Whole seconds rendered as `1h2m3s`, `4m5s` or `6s`.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
