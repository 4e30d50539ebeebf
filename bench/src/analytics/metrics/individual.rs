use mqtt_bench_report::utils::{max, mean, min, sample_std_dev};
use mqtt_bench_report::worker_result::WorkerResult;
use std::time::Duration;

/// Builds a worker result from its latency sample set (nanoseconds).
///
/// Standard deviation stays at zero below two samples instead of NaN, and
/// throughput is zero when no measurable time has elapsed.
pub fn from_samples(
    worker_id: u32,
    latencies: &[f64],
    duplicates: u64,
    run_time: Duration,
) -> WorkerResult {
    let successes = latencies.len() as u64;
    let run_time_secs = run_time.as_secs_f64();
    let messages_per_second = if run_time_secs > 0.0 {
        successes as f64 / run_time_secs
    } else {
        0.0
    };

    WorkerResult {
        worker_id,
        successes,
        run_time_secs,
        latency_min: min(latencies).unwrap_or_default(),
        latency_max: max(latencies).unwrap_or_default(),
        latency_mean: mean(latencies).unwrap_or_default(),
        latency_std: sample_std_dev(latencies).unwrap_or_default(),
        messages_per_second,
        duplicates,
    }
}
