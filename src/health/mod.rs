mod checks;
mod models;
mod probe;
mod system;

pub use checks::HealthChecker;
pub use models::{
    format_uptime, Dependency, DependencyCheckResult, HealthReport, HealthResponse,
    OverallStatus, MAX_DETAIL_LEN,
};
pub use probe::{probe, spawn_probe, PROBE_TIMEOUT};
pub use system::SystemStats;
