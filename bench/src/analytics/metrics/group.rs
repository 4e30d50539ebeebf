use mqtt_bench_report::aggregate_result::AggregateResult;
use mqtt_bench_report::utils::{mean, sample_std_dev};
use mqtt_bench_report::worker_result::WorkerResult;

/// Reduces per-worker results into the population summary.
///
/// `total_run_time_secs` is the wall clock time of the whole run and
/// `sample_size` the number of workers. The latency mean is the mean of the
/// per-worker means, its deviation stays zero for a single worker. Returns
/// `None` when there is nothing to aggregate.
pub fn aggregate(
    results: &[WorkerResult],
    total_run_time_secs: f64,
    sample_size: usize,
) -> Option<AggregateResult> {
    let first = results.first()?;

    let latency_means: Vec<f64> = results.iter().map(|r| r.latency_mean).collect();
    let messages_per_second: Vec<f64> = results.iter().map(|r| r.messages_per_second).collect();
    let run_times: Vec<f64> = results.iter().map(|r| r.run_time_secs).collect();

    let latency_mean_std = if sample_size > 1 {
        sample_std_dev(&latency_means).unwrap_or_default()
    } else {
        0.0
    };

    Some(AggregateResult {
        successes: results.iter().map(|r| r.successes).sum(),
        total_run_time_secs,
        avg_run_time_secs: mean(&run_times).unwrap_or_default(),
        latency_min: results
            .iter()
            .map(|r| r.latency_min)
            .fold(first.latency_min, f64::min),
        latency_max: results
            .iter()
            .map(|r| r.latency_max)
            .fold(first.latency_max, f64::max),
        latency_mean_avg: mean(&latency_means).unwrap_or_default(),
        latency_mean_std,
        total_messages_per_second: messages_per_second.iter().sum(),
        avg_messages_per_second: mean(&messages_per_second).unwrap_or_default(),
        duplicates: results.iter().map(|r| r.duplicates).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(worker_id: u32, duplicates: u64, latency_mean: f64, rate: f64) -> WorkerResult {
        WorkerResult {
            worker_id,
            successes: 100,
            run_time_secs: 100.0 / rate,
            latency_min: latency_mean - 5.0,
            latency_max: latency_mean + 5.0,
            latency_mean,
            latency_std: 1.0,
            messages_per_second: rate,
            duplicates,
        }
    }

    fn three_workers() -> Vec<WorkerResult> {
        vec![
            worker(0, 0, 10.0, 50.0),
            worker(1, 2, 20.0, 100.0),
            worker(2, 1, 30.0, 25.0),
        ]
    }

    #[test]
    fn should_sum_successes_and_duplicates() {
        let totals = aggregate(&three_workers(), 4.5, 3).unwrap();
        assert_eq!(totals.successes, 300);
        assert_eq!(totals.duplicates, 3);
    }

    #[test]
    fn should_sum_and_average_throughput() {
        let totals = aggregate(&three_workers(), 4.5, 3).unwrap();
        assert_eq!(totals.total_messages_per_second, 175.0);
        assert!((totals.avg_messages_per_second - 175.0 / 3.0).abs() < 1e-9);
        assert_eq!(totals.avg_run_time_secs, (2.0 + 1.0 + 4.0) / 3.0);
        assert_eq!(totals.total_run_time_secs, 4.5);
    }

    #[test]
    fn should_take_extreme_latencies_and_mean_of_means() {
        let totals = aggregate(&three_workers(), 4.5, 3).unwrap();
        assert_eq!(totals.latency_min, 5.0);
        assert_eq!(totals.latency_max, 35.0);
        assert_eq!(totals.latency_mean_avg, 20.0);
        assert_eq!(totals.latency_mean_std, 10.0);
    }

    #[test]
    fn should_keep_negative_maximum_latency() {
        let results = vec![worker(0, 0, -50.0, 10.0), worker(1, 0, -40.0, 10.0)];
        let totals = aggregate(&results, 1.0, 2).unwrap();
        assert_eq!(totals.latency_max, -35.0);
        assert_eq!(totals.latency_min, -55.0);
    }

    #[test]
    fn single_worker_has_zero_mean_std() {
        let totals = aggregate(&[worker(0, 0, 10.0, 50.0)], 2.0, 1).unwrap();
        assert_eq!(totals.latency_mean_std, 0.0);
        assert_eq!(totals.latency_mean_avg, 10.0);
    }

    #[test]
    fn empty_results_cannot_be_aggregated() {
        assert!(aggregate(&[], 1.0, 0).is_none());
    }

    #[test]
    fn aggregation_is_deterministic() {
        let results = three_workers();
        let first = aggregate(&results, 4.5, 3).unwrap();
        let second = aggregate(&results, 4.5, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.latency_mean_std.to_bits(),
            second.latency_mean_std.to_bits()
        );
    }
}
