use crate::analytics::metrics::individual::from_samples;
use crate::message::ReceivedMessage;
use mqtt_bench_report::worker_result::WorkerResult;
use std::num::NonZeroU64;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    Stored,
    /// Arrived after the sample was full, most likely a duplicate or late delivery.
    Surplus,
}

/// Fixed size sample of the first `expected` arrivals.
///
/// Slot `i` always holds arrival `i`; everything past the sample is only
/// counted.
#[derive(Debug)]
pub struct SampleCollector {
    expected: u64,
    slots: Vec<ReceivedMessage>,
    received: u64,
    started_at: Option<Instant>,
}

impl SampleCollector {
    pub fn new(expected: NonZeroU64) -> Self {
        let expected = expected.get();
        Self {
            expected,
            slots: Vec::with_capacity(expected as usize),
            received: 0,
            started_at: None,
        }
    }

    pub fn record(&mut self, message: ReceivedMessage, at: Instant) -> Arrival {
        self.started_at.get_or_insert(at);

        let arrival = if self.received < self.expected {
            debug_assert_eq!(self.slots.len() as u64, self.received);
            self.slots.push(message);
            Arrival::Stored
        } else {
            Arrival::Surplus
        };
        self.received += 1;
        arrival
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn expected(&self) -> u64 {
        self.expected
    }

    pub fn is_complete(&self) -> bool {
        self.received >= self.expected
    }

    /// Run time spans the first arrival up to `finished_at`.
    pub fn finish(self, worker_id: u32, finished_at: Instant) -> WorkerResult {
        let run_time = self
            .started_at
            .map(|started_at| finished_at.saturating_duration_since(started_at))
            .unwrap_or_default();
        let latencies: Vec<f64> = self
            .slots
            .iter()
            .map(|message| message.latency_nanos() as f64)
            .collect();
        let duplicates = self.received.saturating_sub(self.slots.len() as u64);

        from_samples(worker_id, &latencies, duplicates, run_time)
    }
}
