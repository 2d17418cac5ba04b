//! Defines the JSON protocol used between birthday-notifs and store
//! provider binaries over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ReadMonth,
    WriteMonth,
}

/// Request sent to the provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by the provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// Fetch one month document. `None` means the store has no such month.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadMonth {
    /// Provider-specific config (e.g. cosmos_endpoint, cosmos_container)
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub month: String,
}

impl ProviderCommand for ReadMonth {
    type Response = Option<serde_json::Value>;
    fn command() -> Command {
        Command::ReadMonth
    }
}

/// Replace (upsert) one month document.
#[derive(Debug, Serialize, Deserialize)]
pub struct WriteMonth {
    #[serde(flatten)]
    pub store_config: serde_json::Map<String, serde_json::Value>,
    pub month: String,
    pub document: serde_json::Value,
}

impl ProviderCommand for WriteMonth {
    type Response = ();
    fn command() -> Command {
        Command::WriteMonth
    }
}
