pub mod broker_address;
pub mod mqtt;
pub mod tls;

use crate::error::BenchError;
use crate::observer::SubscriberObserver;
use async_trait::async_trait;
use bytes::Bytes;
use std::ops::ControlFlow;
use std::sync::Arc;

/// Invoked for every inbound frame. `Break` tells the transport that nobody
/// is listening anymore and the subscription may end.
pub type MessageHandler = Box<dyn Fn(Bytes) -> ControlFlow<()> + Send + Sync>;

/// Connection and subscription plumbing shared by all subscribers.
///
/// The returned future lives as long as the subscription. Reconnecting after a
/// transient loss is the implementation's business; it only reports such
/// events to the observer.
#[async_trait]
pub trait SubscriberTransport: Send + Sync {
    async fn connect_and_subscribe(
        &self,
        worker_id: u32,
        on_message: MessageHandler,
        observer: Arc<dyn SubscriberObserver>,
    ) -> Result<(), BenchError>;
}
