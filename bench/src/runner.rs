use crate::actors::subscriber::{Subscriber, WorkerOutcome};
use crate::analytics::metrics::group::aggregate;
use crate::analytics::report_builder::BenchmarkReportBuilder;
use crate::args::common::SubscriberBenchArgs;
use crate::error::BenchError;
use crate::observer::SubscriberObserver;
use crate::transport::SubscriberTransport;
use futures::future::join_all;
use mqtt_bench_report::aggregate_result::AggregateResult;
use mqtt_bench_report::hardware::BenchmarkHardware;
use mqtt_bench_report::output_format::OutputFormat;
use mqtt_bench_report::params::BenchmarkParams;
use mqtt_bench_report::worker_result::WorkerResult;
use mqtt_bench_report::{render_json, render_text};
use std::num::NonZeroU64;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{error, info};

pub struct BenchmarkRunner {
    args: SubscriberBenchArgs,
    transport: Arc<dyn SubscriberTransport>,
    observer: Arc<dyn SubscriberObserver>,
}

impl BenchmarkRunner {
    pub fn new(
        args: SubscriberBenchArgs,
        transport: Arc<dyn SubscriberTransport>,
        observer: Arc<dyn SubscriberObserver>,
    ) -> Self {
        Self {
            args,
            transport,
            observer,
        }
    }

    pub async fn run(&self) -> Result<(), BenchError> {
        info!(
            "Starting to benchmark {} subscribers on topic {} with broker: {}",
            self.args.clients, self.args.topic, self.args.broker
        );

        let started_at = Instant::now();
        let runs = collect_results(
            self.args.clients.get(),
            self.args.count,
            self.args.timeout,
            &self.transport,
            &self.observer,
            self.args.quiet,
        )
        .await?;
        let total_run_time_secs = started_at.elapsed().as_secs_f64();
        info!("All subscribers finished");

        let totals = aggregate(&runs, total_run_time_secs, runs.len()).ok_or_else(|| {
            BenchError::InvalidConfiguration("at least one subscriber is required".to_owned())
        })?;

        self.print_results(&runs, &totals)?;

        let identifier = self.args.identifier.clone().or_else(|| {
            hostname::get()
                .ok()
                .map(|name| name.to_string_lossy().to_string())
        });
        let report = BenchmarkReportBuilder::build(
            BenchmarkHardware::detect(identifier),
            BenchmarkParams::from(&self.args),
            runs,
            totals,
        );
        report.print_summary();

        if let Some(output_dir) = &self.args.output_dir {
            let full_output_path = Path::new(output_dir)
                .join(self.args.generate_dir_name())
                .to_string_lossy()
                .to_string();
            report.dump_to_json(&full_output_path).map_err(|e| {
                error!("Failed to write report to {full_output_path}: {e}");
                BenchError::CannotWriteToFile(e)
            })?;
            info!("Report saved to {full_output_path}");
        }

        Ok(())
    }

    fn print_results(
        &self,
        runs: &[WorkerResult],
        totals: &AggregateResult,
    ) -> Result<(), BenchError> {
        match self.args.format {
            OutputFormat::Text => print!("{}", render_text(runs, totals)),
            OutputFormat::Json => println!(
                "{}",
                render_json(runs, totals).map_err(BenchError::CannotSerializeResults)?
            ),
        }
        Ok(())
    }
}

/// Starts `clients` subscribers and waits for every one of their outcomes.
///
/// Results are ordered by worker id. Any failed subscriber fails the run
/// once all outcomes are in.
pub async fn collect_results(
    clients: u32,
    receive_count: NonZeroU64,
    timeout: Option<Duration>,
    transport: &Arc<dyn SubscriberTransport>,
    observer: &Arc<dyn SubscriberObserver>,
    quiet: bool,
) -> Result<Vec<WorkerResult>, BenchError> {
    let (results_sender, mut results_receiver) = mpsc::channel::<WorkerOutcome>(clients as usize);

    let mut handles = Vec::with_capacity(clients as usize);
    for worker_id in 0..clients {
        if !quiet {
            info!("Starting subscriber #{worker_id}");
        }
        let subscriber = Subscriber::new(
            worker_id,
            receive_count,
            timeout,
            transport.clone(),
            observer.clone(),
        );
        handles.push(tokio::spawn(subscriber.run(results_sender.clone())));
    }
    // Only the subscribers hold senders now, so a lost subscriber closes the channel.
    drop(results_sender);

    let mut runs = Vec::with_capacity(clients as usize);
    let mut failed = 0;
    for collected in 0..clients {
        match results_receiver.recv().await {
            Some(Ok(result)) => runs.push(result),
            Some(Err(e)) => {
                error!("Subscriber failed: {e}");
                failed += 1;
            }
            None => {
                return Err(BenchError::ResultChannelClosed {
                    collected,
                    expected: clients,
                })
            }
        }
    }

    for joined in join_all(handles).await {
        if let Err(e) = joined {
            error!("Subscriber task failed: {e}");
        }
    }

    if failed > 0 {
        return Err(BenchError::WorkersFailed {
            failed,
            total: clients,
        });
    }

    runs.sort_by_key(|run| run.worker_id);
    Ok(runs)
}
