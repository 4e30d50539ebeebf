use crate::error::BenchError;
use crate::message::ReceivedMessage;
use mqtt_bench_report::worker_result::WorkerResult;
use tracing::{info, warn};

/// Receives the events a subscriber emits while measuring.
///
/// Every method defaults to a no-op so that tests can run silently.
pub trait SubscriberObserver: Send + Sync {
    fn on_connected(&self, _worker_id: u32, _broker: &str) {}

    fn on_connection_lost(&self, _worker_id: u32, _reason: &str) {}

    fn on_connect_failed(&self, _worker_id: u32, _reason: &str) {}

    fn on_subscribe_failed(&self, _worker_id: u32, _reason: &str) {}

    fn on_decode_failed(&self, _worker_id: u32, _error: &BenchError) {}

    fn on_surplus(&self, _worker_id: u32, _message: &ReceivedMessage) {}

    fn on_progress(&self, _worker_id: u32, _received: u64, _expected: u64) {}

    fn on_finished(&self, _result: &WorkerResult) {}
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct SilentObserver;

#[cfg(test)]
impl SubscriberObserver for SilentObserver {}

/// Forwards subscriber events to `tracing`; `quiet` drops the informational ones.
#[derive(Debug, Default)]
pub struct TracingObserver {
    quiet: bool,
}

impl TracingObserver {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl SubscriberObserver for TracingObserver {
    fn on_connected(&self, worker_id: u32, broker: &str) {
        if !self.quiet {
            info!("Subscriber #{worker_id} → connected to the broker {broker}");
        }
    }

    fn on_connection_lost(&self, worker_id: u32, reason: &str) {
        warn!("Subscriber #{worker_id} → lost connection to the broker: {reason}. Will reconnect...");
    }

    fn on_connect_failed(&self, worker_id: u32, reason: &str) {
        warn!("Subscriber #{worker_id} → error connecting to the broker: {reason}");
    }

    fn on_subscribe_failed(&self, worker_id: u32, reason: &str) {
        warn!("Subscriber #{worker_id} → error subscribing to the broker: {reason}");
    }

    fn on_decode_failed(&self, worker_id: u32, error: &BenchError) {
        warn!("Subscriber #{worker_id} → received message which could not be decoded from JSON: {error}");
    }

    fn on_surplus(&self, worker_id: u32, message: &ReceivedMessage) {
        warn!(
            "Subscriber #{worker_id} → received too many messages (probably duplicates): client {}, message {}, generated at {}",
            message.payload.client_id, message.payload.message_id, message.payload.generated_at
        );
    }

    fn on_progress(&self, worker_id: u32, received: u64, expected: u64) {
        if !self.quiet {
            info!("Subscriber #{worker_id} → received {received} of {expected} messages");
        }
    }

    fn on_finished(&self, result: &WorkerResult) {
        if !self.quiet {
            info!(
                "Subscriber #{} → received {} messages in {:.2} s, throughput: {:.2} messages/s, \
                min latency: {:.2} ms, max latency: {:.2} ms, mean latency: {:.2} ms, duplicates: {}",
                result.worker_id,
                result.successes,
                result.run_time_secs,
                result.messages_per_second,
                result.latency_min / 1_000_000.0,
                result.latency_max / 1_000_000.0,
                result.latency_mean / 1_000_000.0,
                result.duplicates,
            );
        }
    }
}
