use serde::{Deserialize, Serialize};

/// Outcome of a single subscriber worker.
///
/// Latency fields are in nanoseconds and may be negative when the publisher
/// and subscriber clocks are skewed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WorkerResult {
    #[serde(rename = "id")]
    pub worker_id: u32,
    pub successes: u64,
    #[serde(rename = "run_time")]
    pub run_time_secs: f64,
    #[serde(rename = "msg_time_min")]
    pub latency_min: f64,
    #[serde(rename = "msg_time_max")]
    pub latency_max: f64,
    #[serde(rename = "msg_time_mean")]
    pub latency_mean: f64,
    #[serde(rename = "msg_time_std")]
    pub latency_std: f64,
    #[serde(rename = "msgs_per_sec")]
    pub messages_per_second: f64,
    pub duplicates: u64,
}
