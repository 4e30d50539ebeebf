use crate::args::common::SubscriberBenchArgs;
use chrono::Utc;
use mqtt_bench_report::{
    aggregate_result::AggregateResult, hardware::BenchmarkHardware, params::BenchmarkParams,
    report::BenchmarkReport, worker_result::WorkerResult,
};

pub struct BenchmarkReportBuilder;

impl BenchmarkReportBuilder {
    pub fn build(
        hardware: BenchmarkHardware,
        params: BenchmarkParams,
        mut runs: Vec<WorkerResult>,
        totals: AggregateResult,
    ) -> BenchmarkReport {
        let uuid = uuid::Uuid::new_v4();
        let timestamp = Utc::now().to_rfc3339();

        runs.sort_by_key(|run| run.worker_id);

        BenchmarkReport {
            uuid,
            timestamp,
            hardware,
            params,
            runs,
            totals,
        }
    }
}

impl From<&SubscriberBenchArgs> for BenchmarkParams {
    fn from(args: &SubscriberBenchArgs) -> Self {
        BenchmarkParams {
            broker: args.broker.clone(),
            topic: args.topic.clone(),
            qos: args.qos,
            messages_per_client: args.count.get(),
            clients: args.clients.get(),
            client_prefix: args.client_prefix.clone(),
            tls: args.tls_material().is_some(),
            timeout: args
                .timeout
                .map(|timeout| humantime::format_duration(timeout).to_string()),
            pretty_name: args.generate_pretty_name(),
            bench_command: std::env::args().collect::<Vec<_>>().join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn should_order_runs_by_worker_id() {
        let runs = [2, 0, 1]
            .into_iter()
            .map(|worker_id| WorkerResult {
                worker_id,
                ..Default::default()
            })
            .collect();
        let report = BenchmarkReportBuilder::build(
            BenchmarkHardware::default(),
            BenchmarkParams::default(),
            runs,
            AggregateResult::default(),
        );

        let ids: Vec<u32> = report.runs.iter().map(|run| run.worker_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn should_capture_params_from_args() {
        let args = SubscriberBenchArgs::parse_from([
            "mqtt-sub-bench",
            "--clients",
            "3",
            "--count",
            "20",
            "--timeout",
            "30s",
        ]);
        let params = BenchmarkParams::from(&args);

        assert_eq!(params.clients, 3);
        assert_eq!(params.messages_per_client, 20);
        assert_eq!(params.total_messages(), 60);
        assert_eq!(params.timeout.as_deref(), Some("30s"));
        assert!(!params.tls);
    }
}
