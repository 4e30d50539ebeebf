use super::defaults::*;
use super::examples::print_examples;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use mqtt_bench_report::output_format::OutputFormat;
use std::num::{NonZeroU32, NonZeroU64};
use std::path::Path;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SubscriberBenchArgs {
    /// MQTT broker endpoint as scheme://host:port
    #[arg(long, default_value_t = DEFAULT_BROKER.to_owned())]
    pub broker: String,

    /// MQTT topic the subscribers listen on
    #[arg(long, default_value_t = DEFAULT_TOPIC.to_owned())]
    pub topic: String,

    /// MQTT client username (empty if auth disabled)
    #[arg(long, default_value_t = String::new())]
    pub username: String,

    /// MQTT client password (empty if auth disabled)
    #[arg(long, default_value_t = String::new())]
    pub password: String,

    /// QoS level of the subscription
    #[arg(long, default_value_t = DEFAULT_QOS, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub qos: u8,

    /// Number of messages to receive per client
    #[arg(long, default_value = DEFAULT_MESSAGES_PER_CLIENT)]
    pub count: NonZeroU64,

    /// Number of clients to start
    #[arg(long, default_value = DEFAULT_CLIENTS)]
    pub clients: NonZeroU32,

    /// Output format: text|json
    #[arg(long, default_value_t = OutputFormat::Text, value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress informational logs while running
    #[arg(long, default_value_t = DEFAULT_QUIET)]
    pub quiet: bool,

    /// MQTT client id prefix (suffixed with '-<client-num>')
    #[arg(long, default_value_t = DEFAULT_CLIENT_PREFIX.to_owned())]
    pub client_prefix: String,

    /// Path to client certificate in PEM format
    #[arg(long, value_parser = validate_file_path)]
    pub client_cert: Option<String>,

    /// Path to private client key in PEM format
    #[arg(long, value_parser = validate_file_path)]
    pub client_key: Option<String>,

    /// Per subscriber deadline (e.g. 30s, 5m); without it a subscriber waits forever
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Output directory path for storing the full benchmark report
    #[arg(long, short = 'o')]
    pub output_dir: Option<String>,

    /// Identifier for the benchmark run (defaults to hostname if not provided)
    #[arg(long)]
    pub identifier: Option<String>,

    /// Print usage examples and exit
    #[arg(long, default_value_t = false)]
    pub examples: bool,
}

fn parse_output_format(v: &str) -> Result<OutputFormat, String> {
    match v.to_ascii_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Unsupported output format '{v}', expected text or json.")),
    }
}

fn validate_file_path(v: &str) -> Result<String, String> {
    if Path::new(v).exists() {
        Ok(v.to_owned())
    } else {
        Err(format!("Provided file '{v}' does not exist."))
    }
}

impl SubscriberBenchArgs {
    /// Exits through clap's error path on invalid combinations.
    pub fn validate(&self) {
        if self.examples {
            print_examples();
            std::process::exit(0);
        }

        match (&self.client_cert, &self.client_key) {
            (Some(_), None) => SubscriberBenchArgs::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "Invalid arguments: private client key path missing",
                )
                .exit(),
            (None, Some(_)) => SubscriberBenchArgs::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "Invalid arguments: certificate path missing",
                )
                .exit(),
            _ => {}
        }

        if self.output_dir.is_none() && self.identifier.is_some() {
            SubscriberBenchArgs::command()
                .error(
                    ErrorKind::ArgumentConflict,
                    "--identifier can only be used with --output-dir",
                )
                .exit();
        }
    }

    pub fn tls_material(&self) -> Option<(&str, &str)> {
        match (&self.client_cert, &self.client_key) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.username.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((self.username.as_str(), self.password.as_str()))
    }

    /// Generates the output directory name based on benchmark parameters.
    pub fn generate_dir_name(&self) -> String {
        let mut parts = vec![
            "subscribe".to_owned(),
            self.clients.to_string(),
            self.count.to_string(),
            format!("qos{}", self.qos),
        ];

        if self.tls_material().is_some() {
            parts.push("tls".to_owned());
        }

        if let Some(identifier) = &self.identifier {
            parts.push(identifier.to_owned());
        }

        parts.join("_")
    }

    /// Generates a human-readable pretty name for the benchmark
    pub fn generate_pretty_name(&self) -> String {
        format!(
            "{} subscribers, {} msgs/subscriber, QoS {}",
            self.clients, self.count, self.qos
        )
    }
}
