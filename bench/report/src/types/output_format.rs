use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    #[display("text")]
    #[serde(rename = "text")]
    Text,
    #[display("json")]
    #[serde(rename = "json")]
    Json,
}
