use crate::aggregate_result::AggregateResult;
use crate::hardware::BenchmarkHardware;
use crate::params::BenchmarkParams;
use crate::worker_result::WorkerResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkReport {
    /// Benchmark unique identifier
    pub uuid: Uuid,

    /// Timestamp when the benchmark was finished
    pub timestamp: String,

    /// Benchmark hardware
    pub hardware: BenchmarkHardware,

    /// Benchmark parameters
    pub params: BenchmarkParams,

    /// Per subscriber results, ordered by worker id
    pub runs: Vec<WorkerResult>,

    /// Results of all subscribers
    pub totals: AggregateResult,
}

impl BenchmarkReport {
    pub fn dump_to_json(&self, output_dir: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(output_dir)?;

        let report_path = Path::new(output_dir).join("report.json");
        let report_json = serde_json::to_string_pretty(self)?;
        std::fs::write(report_path, report_json)
    }
}
