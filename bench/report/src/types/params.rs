use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct BenchmarkParams {
    pub broker: String,
    pub topic: String,
    pub qos: u8,
    pub messages_per_client: u64,
    pub clients: u32,
    pub client_prefix: String,
    pub tls: bool,
    pub timeout: Option<String>,
    pub pretty_name: String,
    pub bench_command: String,
}

impl BenchmarkParams {
    pub fn total_messages(&self) -> u64 {
        self.messages_per_client * self.clients as u64
    }
}
