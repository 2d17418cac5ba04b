//! Telegram delivery of the weekly message.

use serde::{Deserialize, Serialize};

use crate::config::TelegramConfig;
use crate::error::{BirthdayError, BirthdayResult};

/// Telegram's legacy Markdown: `*bold*`, `_italic_`.
pub const PARSE_MODE: &str = "Markdown";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Posts messages to one Telegram chat through a bot.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        TelegramNotifier {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }

    fn payload<'a>(&'a self, text: &'a str) -> SendMessage<'a> {
        SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: PARSE_MODE,
        }
    }

    /// Send `text` to the configured chat.
    pub async fn send(&self, text: &str) -> BirthdayResult<()> {
        // Errors carry the request URL, which contains the bot token.
        let response = self
            .client
            .post(self.endpoint())
            .json(&self.payload(text))
            .send()
            .await
            .map_err(|e| BirthdayError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| BirthdayError::Delivery(e.without_url().to_string()))?;

        if !status.is_success() || !body.ok {
            return Err(BirthdayError::Delivery(
                body.description.unwrap_or_else(|| status.to_string()),
            ));
        }

        tracing::debug!(chat_id = %self.chat_id, "message delivered");
        Ok(())
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}
