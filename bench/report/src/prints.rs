use crate::aggregate_result::AggregateResult;
use crate::report::BenchmarkReport;
use crate::results::BenchmarkResults;
use crate::worker_result::WorkerResult;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use tracing::info;

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Renders per-client blocks followed by the totals block.
pub fn render_text(runs: &[WorkerResult], totals: &AggregateResult) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&run.formatted_block());
    }
    out.push_str(&totals.formatted_block(runs.len()));
    out
}

/// Renders the `{runs, totals}` document, tab indented.
pub fn render_json(
    runs: &[WorkerResult],
    totals: &AggregateResult,
) -> Result<String, serde_json::Error> {
    let results = BenchmarkResults::new(runs.to_vec(), *totals);
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    results.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

impl WorkerResult {
    fn formatted_block(&self) -> String {
        format!(
            "======= CLIENT {} =======\n\
             Number of messages received: {}\n\
             Runtime (s):                 {:.3}\n\
             Msg latency min (ms):        {:.3}\n\
             Msg latency max (ms):        {:.3}\n\
             Msg latency mean (ms):       {:.3}\n\
             Msg latency std (ms):        {:.3}\n\
             Bandwidth (msg/sec):         {:.3}\n\
             Duplicates:                  {}\n\n",
            self.worker_id,
            self.successes,
            self.run_time_secs,
            self.latency_min / NANOS_PER_MILLI,
            self.latency_max / NANOS_PER_MILLI,
            self.latency_mean / NANOS_PER_MILLI,
            self.latency_std / NANOS_PER_MILLI,
            self.messages_per_second,
            self.duplicates,
        )
    }
}

impl AggregateResult {
    fn formatted_block(&self, clients: usize) -> String {
        format!(
            "========= TOTAL ({}) =========\n\
             Number of messages received: {}\n\
             Total Runtime (sec):         {:.3}\n\
             Average Runtime (sec):       {:.3}\n\
             Msg latency min (ms):        {:.3}\n\
             Msg latency max (ms):        {:.3}\n\
             Msg latency mean mean (ms):  {:.3}\n\
             Msg latency mean std (ms):   {:.3}\n\
             Average Bandwidth (msg/sec): {:.3}\n\
             Total Bandwidth (msg/sec):   {:.3}\n\
             Duplicates:                  {}\n\n",
            clients,
            self.successes,
            self.total_run_time_secs,
            self.avg_run_time_secs,
            self.latency_min / NANOS_PER_MILLI,
            self.latency_max / NANOS_PER_MILLI,
            self.latency_mean_avg / NANOS_PER_MILLI,
            self.latency_mean_std / NANOS_PER_MILLI,
            self.avg_messages_per_second,
            self.total_messages_per_second,
            self.duplicates,
        )
    }

    pub fn formatted_string(&self) -> ColoredString {
        format!(
            "Subscribers Results: Total throughput: {:.0} messages/s, average throughput per subscriber: {:.0} messages/s, \
            min latency: {:.2} ms, max latency: {:.2} ms, mean of mean latencies: {:.2} ms, std of mean latencies: {:.2} ms, \
            duplicates: {}",
            self.total_messages_per_second,
            self.avg_messages_per_second,
            self.latency_min / NANOS_PER_MILLI,
            self.latency_max / NANOS_PER_MILLI,
            self.latency_mean_avg / NANOS_PER_MILLI,
            self.latency_mean_std / NANOS_PER_MILLI,
            self.duplicates,
        )
        .green()
    }
}

impl BenchmarkReport {
    pub fn print_summary(&self) {
        let params_print = format!(
            "Benchmark: subscribe, broker: {}, topic: {}, QoS {}, {} subscribers, {} messages per subscriber, total messages: {}\n",
            self.params.broker,
            self.params.topic,
            self.params.qos,
            self.params.clients,
            self.params.messages_per_client,
            self.params.total_messages(),
        )
        .blue();

        info!("{}", params_print);
        info!("{}\n", self.totals.formatted_string());
    }
}
