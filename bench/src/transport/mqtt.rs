use super::broker_address::BrokerAddress;
use super::tls;
use super::{MessageHandler, SubscriberTransport};
use crate::args::common::SubscriberBenchArgs;
use crate::error::BenchError;
use crate::observer::SubscriberObserver;
use async_trait::async_trait;
use rumqttc::{
    AsyncClient, Event, MqttOptions, Packet, QoS, SubscribeReasonCode, TlsConfiguration,
    Transport,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const REQUEST_CHANNEL_CAPACITY: usize = 10;
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

pub struct MqttTransport {
    broker: BrokerAddress,
    topic: String,
    qos: QoS,
    client_prefix: String,
    credentials: Option<(String, String)>,
    tls: Option<BrokerTls>,
}

/// How a TLS broker session is set up.
enum BrokerTls {
    /// Server verified against the platform's trusted roots.
    Verified(Arc<rustls::ClientConfig>),
    /// Client certificate presented, server certificate not verified.
    ClientCertificate(Arc<rustls::ClientConfig>),
}

impl BrokerTls {
    fn config(&self) -> Arc<rustls::ClientConfig> {
        match self {
            BrokerTls::Verified(config) | BrokerTls::ClientCertificate(config) => config.clone(),
        }
    }
}

impl MqttTransport {
    pub fn from_args(args: &SubscriberBenchArgs) -> Result<Self, BenchError> {
        let broker: BrokerAddress = args.broker.parse()?;
        let tls_material = args.tls_material();
        if tls_material.is_some() && !broker.tls {
            warn!(
                "Client certificate provided but broker {} is not a TLS endpoint, certificate will not be used",
                broker
            );
        }
        let tls = match (broker.tls, tls_material) {
            (false, _) => None,
            (true, None) => Some(BrokerTls::Verified(Arc::new(tls::verified_config()?))),
            (true, Some((cert_path, key_path))) => Some(BrokerTls::ClientCertificate(Arc::new(
                tls::client_config(cert_path, key_path)?,
            ))),
        };

        Ok(Self {
            broker,
            topic: args.topic.clone(),
            qos: qos(args.qos)?,
            client_prefix: args.client_prefix.clone(),
            credentials: args
                .credentials()
                .map(|(username, password)| (username.to_owned(), password.to_owned())),
            tls,
        })
    }

    pub fn client_id(&self, worker_id: u32) -> String {
        format!("Subscriber-{}-{}", self.client_prefix, worker_id)
    }

    fn options(&self, worker_id: u32) -> MqttOptions {
        let mut options = MqttOptions::new(
            self.client_id(worker_id),
            self.broker.host.clone(),
            self.broker.port,
        );
        options.set_clean_session(true);
        if let Some((username, password)) = &self.credentials {
            options.set_credentials(username.clone(), password.clone());
        }
        if let Some(tls) = &self.tls {
            options.set_transport(Transport::tls_with_config(TlsConfiguration::Rustls(
                tls.config(),
            )));
        }
        options
    }
}

#[async_trait]
impl SubscriberTransport for MqttTransport {
    async fn connect_and_subscribe(
        &self,
        worker_id: u32,
        on_message: MessageHandler,
        observer: Arc<dyn SubscriberObserver>,
    ) -> Result<(), BenchError> {
        let (client, mut eventloop) =
            AsyncClient::new(self.options(worker_id), REQUEST_CHANNEL_CAPACITY);
        let broker = self.broker.to_string();
        let mut connected = false;

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    connected = true;
                    observer.on_connected(worker_id, &broker);
                    // Clean sessions drop subscriptions, so every CONNACK subscribes again.
                    if let Err(error) = client.try_subscribe(self.topic.clone(), self.qos) {
                        observer.on_subscribe_failed(worker_id, &error.to_string());
                    }
                }
                Ok(Event::Incoming(Packet::SubAck(ack))) => {
                    if ack
                        .return_codes
                        .iter()
                        .any(|code| matches!(code, SubscribeReasonCode::Failure))
                    {
                        observer.on_subscribe_failed(
                            worker_id,
                            &format!("broker rejected subscription to {}", self.topic),
                        );
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if on_message(publish.payload).is_break() {
                        debug!("Subscriber #{worker_id} → no longer listening, disconnecting");
                        if let Err(error) = client.try_disconnect() {
                            debug!("Subscriber #{worker_id} → cannot request disconnect: {error}");
                        }
                        return Ok(());
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    if connected {
                        observer.on_connection_lost(worker_id, &error.to_string());
                    } else {
                        observer.on_connect_failed(worker_id, &error.to_string());
                    }
                    connected = false;
                    sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }
}

pub fn qos(level: u8) -> Result<QoS, BenchError> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        _ => Err(BenchError::InvalidConfiguration(format!(
            "QoS must be 0, 1 or 2, given: {level}"
        ))),
    }
}
