//! Struct and methods to call the Telegram Bot API.

use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Clone)]
pub struct TelegramApi {
    token: String,
    client: reqwest::Client,
}

impl TelegramApi {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            token: dotenv::var("TELEGRAM_BOT_TOKEN")?,
            client,
        })
    }

    /// Sends a Markdown reply to a chat. Failures are logged and returned,
    /// but callers treat them as non-fatal: the webhook response to Telegram
    /// is an ack either way.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);

        debug!("Sending Telegram message to chat {chat_id}");

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            error!(
                "Telegram sendMessage failed with status: {} {}",
                response.status(),
                response.text().await?
            );
            Err("Telegram sendMessage failed".into())
        }
    }
}
