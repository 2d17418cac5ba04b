//! Provider subprocess store.
//!
//! Month documents are read and written through an external binary
//! (e.g. `birthday-store-cosmos`) speaking JSON over stdin/stdout, so the
//! cloud SDK and its credentials stay out of this crate.

use std::time::Duration;

use chrono::Month;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{BirthdayError, BirthdayResult};
use crate::store::protocol::{Command, ProviderCommand, ReadMonth, Request, Response, WriteMonth};
use crate::store::{MonthStore, StoreParams};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("birthday-store-{}", self.0)
    }

    fn binary_path(&self) -> BirthdayResult<std::path::PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| BirthdayError::ProviderNotInstalled(binary_name))
    }

    /// Call a typed provider command and return the result.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> BirthdayResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| BirthdayError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> BirthdayResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| BirthdayError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| BirthdayError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        tracing::debug!(provider = %self.0, ?command, "calling store provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                BirthdayError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BirthdayError::Provider("Provider stdin was not captured".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(BirthdayError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Decode a provider's stdout into the command's response type.
fn parse_response<R: serde::de::DeserializeOwned>(stdout: &str) -> BirthdayResult<R> {
    if stdout.trim().is_empty() {
        return Err(BirthdayError::Provider("Provider returned no response".into()));
    }

    let response: Response<R> = serde_json::from_str(stdout)
        .map_err(|e| BirthdayError::Provider(format!("Failed to parse response: {}", e)))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(BirthdayError::Provider(error)),
    }
}

/// A [`MonthStore`] backed by a provider binary.
#[derive(Debug, Clone)]
pub struct ProviderStore {
    provider: Provider,
    params: StoreParams,
}

impl ProviderStore {
    pub fn new(provider: Provider, params: StoreParams) -> Self {
        ProviderStore { provider, params }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    fn store_config(&self) -> serde_json::Map<String, Value> {
        serde_json::Map::from(&self.params)
    }
}

impl MonthStore for ProviderStore {
    async fn read(&self, month: Month) -> BirthdayResult<Option<Value>> {
        self.provider
            .call(ReadMonth {
                store_config: self.store_config(),
                month: month.name().to_string(),
            })
            .await
    }

    async fn write(&self, month: Month, document: &Value) -> BirthdayResult<()> {
        self.provider
            .call(WriteMonth {
                store_config: self.store_config(),
                month: month.name().to_string(),
                document: document.clone(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_name_is_prefixed() {
        assert_eq!(Provider::from_name("cosmos").binary_name(), "birthday-store-cosmos");
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let store = ProviderStore::new(
            Provider::from_name("definitely-not-installed-anywhere"),
            StoreParams::default(),
        );
        assert!(matches!(
            store.read(Month::June).await,
            Err(BirthdayError::ProviderNotInstalled(name))
                if name == "birthday-store-definitely-not-installed-anywhere"
        ));
    }

    #[test]
    fn parse_response_maps_errors() {
        let data: Option<Value> =
            parse_response(r#"{"status":"success","data":null}"#).unwrap();
        assert!(data.is_none());

        assert!(matches!(
            parse_response::<()>(r#"{"status":"error","error":"forbidden"}"#),
            Err(BirthdayError::Provider(msg)) if msg == "forbidden"
        ));
        assert!(matches!(parse_response::<()>("  "), Err(BirthdayError::Provider(_))));
        assert!(matches!(parse_response::<()>("garbage"), Err(BirthdayError::Provider(_))));
    }
}
