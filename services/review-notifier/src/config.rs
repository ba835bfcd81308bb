//! Configuration types for the review notifier

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the review API OAuth token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat id
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Review API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default, skip_serializing)]
    pub token: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Telegram notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    #[serde(default, skip_serializing)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
            token: String::new(),
            chat_id: String::new(),
        }
    }
}

/// Polling loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Unix timestamp for the first `from_date`; current time when absent
    #[serde(default)]
    pub initial_from_date: Option<i64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            initial_from_date: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_interval() -> u64 {
    600
}

impl Config {
    /// Fill secrets from the process environment.
    ///
    /// Environment values take precedence over the config file. Fails if any
    /// secret is still empty afterwards.
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_from(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::resolve_secrets`] with an injectable lookup
    pub fn resolve_secrets_from<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (PRACTICUM_TOKEN_VAR, &mut self.api.token),
            (TELEGRAM_TOKEN_VAR, &mut self.telegram.token),
            (TELEGRAM_CHAT_ID_VAR, &mut self.telegram.chat_id),
        ];

        let mut missing = Vec::new();
        for (name, slot) in slots {
            if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                *slot = value;
            }
            if slot.is_empty() {
                tracing::error!("Missing required secret {}", name);
                missing.push(name);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::ReviewError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    tracing::debug!("Reading config file {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
