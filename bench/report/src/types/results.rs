use super::{aggregate_result::AggregateResult, worker_result::WorkerResult};
use serde::{Deserialize, Serialize};

/// Document printed on stdout for the JSON output format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, derive_new::new)]
pub struct BenchmarkResults {
    pub runs: Vec<WorkerResult>,
    pub totals: AggregateResult,
}
