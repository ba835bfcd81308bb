//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::{Notification, Notifier};
use crate::ReviewError;

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram notification sender
pub struct TelegramNotifier {
    send_message_url: String,
    token: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let api_base = config.api_base.trim_end_matches('/');
        tracing::debug!("Created TelegramNotifier for {}", api_base);

        Self {
            send_message_url: format!("{}/bot{}/sendMessage", api_base, config.token),
            token: config.token.clone(),
            http,
        }
    }

    /// Strip the bot token from anything headed for logs
    fn redact(&self, text: &str) -> String {
        if self.token.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.token, "<redacted>")
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, notification: &Notification) -> crate::Result<()> {
        let params = [
            ("chat_id", notification.chat_id.as_str()),
            ("text", notification.text.as_str()),
        ];

        tracing::debug!(
            "Sending Telegram message to chat {} ({} chars)",
            notification.chat_id,
            notification.text.chars().count()
        );

        let response = self
            .http
            .post_form(&self.send_message_url, &params)
            .await
            .map_err(|e| ReviewError::Delivery(self.redact(&e.to_string())))?;

        let parsed = serde_json::from_str::<BotApiResponse>(&response.body).ok();
        let accepted = response.status == 200 && parsed.as_ref().is_some_and(|r| r.ok);

        if !accepted {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or_else(|| response.body.clone());
            return Err(ReviewError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status,
                self.redact(&description)
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
