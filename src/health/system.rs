use serde::{Deserialize, Serialize};

const RUNTIME_VERSION: &str = env!("GORBIT_RUSTC_VERSION");

/// Process statistics attached to every health report. Informational only,
/// never part of the health decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub runtime_version: String,
    pub memory: String,
    pub num_cpu: usize,
    /// Live tasks on the current async runtime.
    #[serde(rename = "num_goroutine")]
    pub active_tasks: usize,
}

impl SystemStats {
    pub fn collect() -> Self {
        Self {
            runtime_version: RUNTIME_VERSION.to_string(),
            memory: format!("{:.2} MB", resident_memory_bytes() / 1024.0 / 1024.0),
            num_cpu: num_cpus::get(),
            active_tasks: active_tasks(),
        }
    }
}

fn active_tasks() -> usize {
    tokio::runtime::Handle::try_current()
        .map(|handle| handle.metrics().num_alive_tasks())
        .unwrap_or(0)
}

#[cfg(target_os = "linux")]
fn resident_memory_bytes() -> f64 {
    use prometheus::core::Collector;
    use prometheus::process_collector::ProcessCollector;

    ProcessCollector::for_self()
        .collect()
        .iter()
        .find(|family| family.get_name() == "process_resident_memory_bytes")
        .and_then(|family| family.get_metric().first())
        .map(|metric| metric.get_gauge().get_value())
        .unwrap_or(0.0)
}

#[cfg(not(target_os = "linux"))]
fn resident_memory_bytes() -> f64 {
    0.0
}
