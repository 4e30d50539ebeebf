use super::sample_collector::{Arrival, SampleCollector};
use crate::error::BenchError;
use crate::message::{decode_frame, now_nanos, ReceivedMessage};
use crate::observer::SubscriberObserver;
use crate::transport::{MessageHandler, SubscriberTransport};
use bytes::Bytes;
use mqtt_bench_report::worker_result::WorkerResult;
use std::num::NonZeroU64;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};
use tracing::warn;

const PROGRESS_INTERVAL: u64 = 100;

pub type WorkerOutcome = Result<WorkerResult, BenchError>;

/// One subscriber measuring a fixed size sample of messages.
pub struct Subscriber {
    worker_id: u32,
    receive_count: NonZeroU64,
    timeout: Option<Duration>,
    transport: Arc<dyn SubscriberTransport>,
    observer: Arc<dyn SubscriberObserver>,
}

impl Subscriber {
    pub fn new(
        worker_id: u32,
        receive_count: NonZeroU64,
        timeout: Option<Duration>,
        transport: Arc<dyn SubscriberTransport>,
        observer: Arc<dyn SubscriberObserver>,
    ) -> Self {
        Self {
            worker_id,
            receive_count,
            timeout,
            transport,
            observer,
        }
    }

    /// Measures until the sample is full and pushes exactly one outcome.
    ///
    /// Without a timeout this waits forever if the broker never delivers
    /// enough messages.
    pub async fn run(self, results: mpsc::Sender<WorkerOutcome>) {
        let outcome = self.measure().await;
        if results.send(outcome).await.is_err() {
            warn!(
                "Subscriber #{} → result collector is gone, dropping result",
                self.worker_id
            );
        }
    }

    async fn measure(&self) -> WorkerOutcome {
        let worker_id = self.worker_id;
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let (sender, mut receiver) = mpsc::unbounded_channel();

        let transport = self.transport.clone();
        let observer = self.observer.clone();
        let on_message = self.message_handler(sender);
        let subscription = tokio::spawn(async move {
            if let Err(error) = transport
                .connect_and_subscribe(worker_id, on_message, observer.clone())
                .await
            {
                observer.on_connect_failed(worker_id, &error.to_string());
            }
        });

        let mut collector = SampleCollector::new(self.receive_count);
        while !collector.is_complete() {
            let next = match deadline {
                Some(deadline) => match timeout_at(deadline, receiver.recv()).await {
                    Ok(next) => next,
                    Err(_) => {
                        subscription.abort();
                        return Err(BenchError::ReceiveTimeout {
                            worker_id,
                            received: collector.received(),
                            expected: collector.expected(),
                        });
                    }
                },
                None => receiver.recv().await,
            };

            let Some(message) = next else {
                return Err(BenchError::TransportClosed {
                    worker_id,
                    received: collector.received(),
                    expected: collector.expected(),
                });
            };
            self.record(&mut collector, message);
        }

        let finished_at = Instant::now();
        // Closed first, so only what is already queued counts as surplus.
        receiver.close();
        while let Ok(message) = receiver.try_recv() {
            self.record(&mut collector, message);
        }

        let result = collector.finish(worker_id, finished_at);
        self.observer.on_finished(&result);
        Ok(result)
    }

    fn message_handler(&self, sender: mpsc::UnboundedSender<ReceivedMessage>) -> MessageHandler {
        let worker_id = self.worker_id;
        let observer = self.observer.clone();
        Box::new(move |frame: Bytes| {
            if sender.is_closed() {
                return ControlFlow::Break(());
            }
            match decode_frame(&frame, now_nanos()) {
                Ok(message) => match sender.send(message) {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(_) => ControlFlow::Break(()),
                },
                Err(error) => {
                    observer.on_decode_failed(worker_id, &error);
                    ControlFlow::Continue(())
                }
            }
        })
    }

    fn record(&self, collector: &mut SampleCollector, message: ReceivedMessage) {
        if collector.record(message, Instant::now()) == Arrival::Surplus {
            self.observer.on_surplus(self.worker_id, &message);
        }
        if collector.received() % PROGRESS_INTERVAL == 0 {
            self.observer
                .on_progress(self.worker_id, collector.received(), collector.expected());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::observer::SilentObserver;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// Replays a fixed list of frames, then either hangs up or stays silent.
    pub(crate) struct ScriptedTransport {
        frames: Vec<Vec<u8>>,
        hold_open: bool,
    }

    impl ScriptedTransport {
        pub(crate) fn new(frames: Vec<Vec<u8>>, hold_open: bool) -> Arc<Self> {
            Arc::new(Self { frames, hold_open })
        }
    }

    #[async_trait]
    impl SubscriberTransport for ScriptedTransport {
        async fn connect_and_subscribe(
            &self,
            worker_id: u32,
            on_message: MessageHandler,
            observer: Arc<dyn SubscriberObserver>,
        ) -> Result<(), BenchError> {
            observer.on_connected(worker_id, "scripted");
            for frame in &self.frames {
                if on_message(Bytes::from(frame.clone())).is_break() {
                    return Ok(());
                }
            }
            if self.hold_open {
                std::future::pending::<()>().await;
            }
            Ok(())
        }
    }

    /// Keeps publishing until the handler stops listening.
    #[derive(Default)]
    struct FloodingTransport {
        stopped: AtomicBool,
    }

    #[async_trait]
    impl SubscriberTransport for FloodingTransport {
        async fn connect_and_subscribe(
            &self,
            worker_id: u32,
            on_message: MessageHandler,
            observer: Arc<dyn SubscriberObserver>,
        ) -> Result<(), BenchError> {
            observer.on_connected(worker_id, "flooding");
            let mut message_id = 0;
            loop {
                if on_message(Bytes::from(frame(message_id))).is_break() {
                    self.stopped.store(true, Ordering::SeqCst);
                    return Ok(());
                }
                message_id += 1;
                tokio::task::yield_now().await;
            }
        }
    }

    /// Slow surplus handling, like a warning written to a busy terminal.
    struct SlowSurplusObserver;

    impl SubscriberObserver for SlowSurplusObserver {
        fn on_surplus(&self, _worker_id: u32, _message: &ReceivedMessage) {
            std::thread::sleep(Duration::from_micros(100));
        }
    }

    pub(crate) fn frame(message_id: i64) -> Vec<u8> {
        format!(
            r#"{{"GeneratedAt":{},"ClientId":1,"MessageId":{}}}"#,
            now_nanos(),
            message_id
        )
        .into_bytes()
    }

    pub(crate) fn frames(count: i64) -> Vec<Vec<u8>> {
        (0..count).map(frame).collect()
    }

    #[derive(Default)]
    struct CountingObserver {
        decode_failures: AtomicU64,
        surplus: AtomicU64,
        progress: AtomicU64,
        finished: AtomicU64,
    }

    impl SubscriberObserver for CountingObserver {
        fn on_decode_failed(&self, _worker_id: u32, _error: &BenchError) {
            self.decode_failures.fetch_add(1, Ordering::SeqCst);
        }

        fn on_surplus(&self, _worker_id: u32, _message: &ReceivedMessage) {
            self.surplus.fetch_add(1, Ordering::SeqCst);
        }

        fn on_progress(&self, _worker_id: u32, _received: u64, _expected: u64) {
            self.progress.fetch_add(1, Ordering::SeqCst);
        }

        fn on_finished(&self, _result: &WorkerResult) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn subscriber(
        receive_count: u64,
        timeout: Option<Duration>,
        transport: Arc<dyn SubscriberTransport>,
        observer: Arc<dyn SubscriberObserver>,
    ) -> Subscriber {
        Subscriber::new(
            4,
            NonZeroU64::new(receive_count).unwrap(),
            timeout,
            transport,
            observer,
        )
    }

    #[tokio::test]
    async fn should_measure_exact_sample() {
        let transport = ScriptedTransport::new(frames(250), false);
        let observer = Arc::new(CountingObserver::default());
        let result = subscriber(250, None, transport, observer.clone())
            .measure()
            .await
            .unwrap();

        assert_eq!(result.worker_id, 4);
        assert_eq!(result.successes, 250);
        assert_eq!(result.duplicates, 0);
        assert!(result.latency_min >= 0.0);
        assert!(result.latency_min <= result.latency_mean);
        assert!(result.latency_mean <= result.latency_max);
        assert_eq!(observer.progress.load(Ordering::SeqCst), 2);
        assert_eq!(observer.finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_count_queued_surplus_as_duplicates() {
        let transport = ScriptedTransport::new(frames(13), true);
        let observer = Arc::new(CountingObserver::default());
        let result = subscriber(10, None, transport, observer.clone())
            .measure()
            .await
            .unwrap();

        assert_eq!(result.successes, 10);
        assert_eq!(result.duplicates, 3);
        assert_eq!(observer.surplus.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn should_return_while_frames_keep_arriving() {
        let transport = Arc::new(FloodingTransport::default());
        let worker = subscriber(10, None, transport.clone(), Arc::new(SlowSurplusObserver));
        let measuring = tokio::spawn(async move { worker.measure().await });

        let result = tokio::time::timeout(Duration::from_secs(5), measuring)
            .await
            .expect("subscriber kept draining after its sample was full")
            .unwrap()
            .unwrap();
        assert_eq!(result.successes, 10);

        tokio::time::timeout(Duration::from_secs(5), async {
            while !transport.stopped.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("transport was not told to stop listening");
    }

    #[tokio::test]
    async fn should_report_zero_std_for_single_message() {
        let transport = ScriptedTransport::new(frames(1), true);
        let result = subscriber(1, None, transport, Arc::new(SilentObserver))
            .measure()
            .await
            .unwrap();

        assert_eq!(result.successes, 1);
        assert_eq!(result.latency_std, 0.0);
    }

    #[tokio::test]
    async fn should_skip_malformed_frames() {
        let script = vec![frame(0), b"{broken".to_vec(), frame(1)];
        let transport = ScriptedTransport::new(script, true);
        let observer = Arc::new(CountingObserver::default());
        let result = subscriber(2, None, transport, observer.clone())
            .measure()
            .await
            .unwrap();

        assert_eq!(result.successes, 2);
        assert_eq!(result.duplicates, 0);
        assert_eq!(observer.decode_failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_frames_do_not_count_towards_the_sample() {
        let script = vec![frame(0), b"[]".to_vec(), frame(1)];
        let transport = ScriptedTransport::new(script, false);
        let outcome = subscriber(3, None, transport, Arc::new(SilentObserver))
            .measure()
            .await;

        assert!(matches!(
            outcome,
            Err(BenchError::TransportClosed {
                worker_id: 4,
                received: 2,
                expected: 3,
            })
        ));
    }

    #[tokio::test]
    async fn should_time_out_stalled_subscriber() {
        let transport = ScriptedTransport::new(frames(1), true);
        let outcome = subscriber(
            5,
            Some(Duration::from_millis(50)),
            transport,
            Arc::new(SilentObserver),
        )
        .measure()
        .await;

        assert!(matches!(
            outcome,
            Err(BenchError::ReceiveTimeout {
                received: 1,
                expected: 5,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn run_should_push_exactly_one_outcome() {
        let transport = ScriptedTransport::new(frames(3), false);
        let (sender, mut receiver) = mpsc::channel(4);
        subscriber(3, None, transport, Arc::new(SilentObserver))
            .run(sender)
            .await;

        let outcome = receiver.recv().await.unwrap();
        assert_eq!(outcome.unwrap().successes, 3);
        assert!(receiver.recv().await.is_none());
    }
}
