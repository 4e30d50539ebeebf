pub const DEFAULT_BROKER: &str = "tcp://localhost:1883";
pub const DEFAULT_TOPIC: &str = "/test";
pub const DEFAULT_QOS: u8 = 1;
pub const DEFAULT_MESSAGES_PER_CLIENT: &str = "100";
pub const DEFAULT_CLIENTS: &str = "10";
pub const DEFAULT_CLIENT_PREFIX: &str = "mqtt-benchmark";
pub const DEFAULT_QUIET: bool = false;
