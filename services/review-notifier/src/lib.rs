//! Review notifier - homework review status poller
//!
//! Polls the homework review API, detects verdict changes, and forwards them
//! to a Telegram chat without repeating itself.

pub mod api;
pub mod config;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod gate;
pub mod io;
pub mod notifier;
pub mod state;
pub mod telegram;
pub mod validator;
pub mod verdict;


pub use config::{load_config, Config};
pub use error::{Result, ReviewError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::PracticumClient;
use crate::engine::Engine;
use crate::gate::NotificationGate;
use crate::io::ReqwestHttpClient;
use crate::state::PollerState;
use crate::telegram::TelegramNotifier;

/// Run the review notifier with the given configuration.
///
/// Secrets must already be resolved; see [`Config::resolve_secrets`].
pub async fn run(config: Config) -> Result<()> {
    let timeout = Duration::from_secs(config.api.request_timeout_seconds);
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(timeout)?);
    let cancel = CancellationToken::new();

    let api = Arc::new(PracticumClient::new(&config.api, Arc::clone(&http)));
    let notifier = Arc::new(TelegramNotifier::new(&config.telegram, Arc::clone(&http)));
    let gate = NotificationGate::new(notifier, config.telegram.chat_id.clone());

    let engine = Engine::new(
        api,
        gate,
        Duration::from_secs(config.polling.interval_seconds),
        cancel.clone(),
    );

    let checkpoint = config
        .polling
        .initial_from_date
        .unwrap_or_else(|| chrono::Utc::now().timestamp());
    let mut state = PollerState::new(checkpoint);

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    tracing::info!("Review notifier started");

    // Run the engine (blocks until cancelled)
    engine.run(&mut state).await;

    tracing::info!("Review notifier stopped");
    Ok(())
}
