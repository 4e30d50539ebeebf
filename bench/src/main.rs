mod actors;
mod analytics;
mod args;
mod error;
mod message;
mod observer;
mod runner;
mod transport;

use crate::args::common::SubscriberBenchArgs;
use crate::error::BenchError;
use crate::observer::TracingObserver;
use crate::runner::BenchmarkRunner;
use crate::transport::mqtt::MqttTransport;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[tokio::main]
async fn main() -> Result<(), BenchError> {
    let args = SubscriberBenchArgs::parse();
    args.validate();

    // Results go to stdout, logs to stderr.
    Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("INFO")))
        .init();

    let transport = Arc::new(MqttTransport::from_args(&args)?);
    let observer = Arc::new(TracingObserver::new(args.quiet));

    info!("Starting the benchmark...");
    BenchmarkRunner::new(args, transport, observer).run().await?;
    info!("Finished the benchmark.");
    Ok(())
}
