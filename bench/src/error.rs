use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid broker address: {0}")]
    InvalidBrokerAddress(String),
    #[error("Cannot load TLS material from {path}: {reason}")]
    CannotLoadTlsMaterial { path: String, reason: String },
    #[error("TLS error")]
    Tls(#[from] rustls::Error),
    #[error("Cannot decode payload")]
    CannotDecodePayload(#[from] serde_json::Error),
    #[error("Subscriber #{worker_id} timed out after receiving {received} of {expected} messages")]
    ReceiveTimeout {
        worker_id: u32,
        received: u64,
        expected: u64,
    },
    #[error("Subscriber #{worker_id} transport closed after receiving {received} of {expected} messages")]
    TransportClosed {
        worker_id: u32,
        received: u64,
        expected: u64,
    },
    #[error("Result channel closed with {collected} of {expected} results collected")]
    ResultChannelClosed { collected: u32, expected: u32 },
    #[error("{failed} of {total} subscribers failed")]
    WorkersFailed { failed: u32, total: u32 },
    #[error("Cannot serialize results")]
    CannotSerializeResults(serde_json::Error),
    #[error("Cannot write to file")]
    CannotWriteToFile(#[from] io::Error),
}
