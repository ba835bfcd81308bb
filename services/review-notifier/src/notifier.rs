//! Notifier trait for sending chat messages

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message addressed to a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub chat_id: String,
    pub text: String,
}

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a notification.
    ///
    /// Ordinary delivery failures are reported as `ReviewError::Delivery`.
    async fn notify(&self, notification: &Notification) -> crate::Result<()>;
}
