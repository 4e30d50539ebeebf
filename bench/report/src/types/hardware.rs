use serde::{Deserialize, Serialize};
use sysinfo::System;

const UNKNOWN: &str = "unknown";

/// Machine the subscribers ran on, recorded next to the results.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkHardware {
    pub identifier: Option<String>,
    pub cpu_name: String,
    pub cpu_cores: usize,
    pub total_memory_mb: u64,
    pub os_name: String,
    pub os_version: String,
}

impl BenchmarkHardware {
    /// Reads CPU and memory details only.
    pub fn detect(identifier: Option<String>) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu_name = match sys.cpus().first() {
            Some(cpu) if !cpu.brand().trim().is_empty() => cpu.brand().trim().to_owned(),
            _ => UNKNOWN.to_owned(),
        };

        Self {
            identifier,
            cpu_name,
            cpu_cores: sys.cpus().len(),
            total_memory_mb: sys.total_memory() / (1024 * 1024),
            os_name: System::name().unwrap_or_else(|| UNKNOWN.to_owned()),
            os_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_owned()),
        }
    }
}
