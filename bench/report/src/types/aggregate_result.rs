use serde::{Deserialize, Serialize};

/// Population-level summary over all worker results.
///
/// `latency_mean_avg` is the mean of per-worker means, not a mean over the
/// pooled samples. Workers with different sample sizes are weighted equally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateResult {
    pub successes: u64,
    #[serde(rename = "total_run_time")]
    pub total_run_time_secs: f64,
    #[serde(rename = "avg_run_time")]
    pub avg_run_time_secs: f64,
    #[serde(rename = "msg_time_min")]
    pub latency_min: f64,
    #[serde(rename = "msg_time_max")]
    pub latency_max: f64,
    #[serde(rename = "msg_time_mean_avg")]
    pub latency_mean_avg: f64,
    #[serde(rename = "msg_time_mean_std")]
    pub latency_mean_std: f64,
    #[serde(rename = "total_msgs_per_sec")]
    pub total_messages_per_second: f64,
    #[serde(rename = "avg_msgs_per_sec")]
    pub avg_messages_per_second: f64,
    pub duplicates: u64,
}
