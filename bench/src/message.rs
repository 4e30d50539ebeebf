use crate::error::BenchError;
use chrono::Utc;
use serde::Deserialize;

/// Body published by the load generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Payload {
    #[serde(rename = "GeneratedAt", alias = "generatedAt", alias = "generated_at")]
    pub generated_at: i64,
    #[serde(rename = "ClientId", alias = "clientId", alias = "client_id")]
    pub client_id: i64,
    #[serde(rename = "MessageId", alias = "messageId", alias = "message_id")]
    pub message_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub payload: Payload,
    /// Unix time in nanoseconds, stamped when the frame was decoded.
    pub received_at: i64,
}

impl ReceivedMessage {
    /// Generation-to-arrival delay in nanoseconds, negative under clock skew.
    pub fn latency_nanos(&self) -> i64 {
        self.received_at - self.payload.generated_at
    }
}

pub fn decode_frame(frame: &[u8], received_at: i64) -> Result<ReceivedMessage, BenchError> {
    let payload = serde_json::from_slice::<Payload>(frame)?;
    Ok(ReceivedMessage {
        payload,
        received_at,
    })
}

pub fn now_nanos() -> i64 {
    // Out of range only after the year 2262.
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
