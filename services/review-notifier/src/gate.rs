//! Notification gate: suppresses exact repeats of the last delivered message

use std::sync::Arc;

use crate::notifier::{Notification, Notifier};
use crate::state::NotificationState;

/// What the gate did with a candidate message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Same content as the last delivery; the notifier was not called
    Suppressed,
    /// Sent and recorded as the new dedup key
    Delivered,
    /// Sending failed; the dedup key is unchanged so the next cycle retries
    Failed,
}

/// Decides whether a candidate message reaches the chat
#[derive(Debug, Clone)]
pub struct NotificationGate {
    notifier: Arc<dyn Notifier>,
    chat_id: String,
}

impl NotificationGate {
    pub fn new(notifier: Arc<dyn Notifier>, chat_id: impl Into<String>) -> Self {
        Self {
            notifier,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Offer a candidate message, updating `state` only after a successful send
    pub async fn offer(&self, state: &mut NotificationState, candidate: &str) -> GateDecision {
        if state.is_repeat(candidate) {
            tracing::debug!("Suppressing repeated notification: {}", candidate);
            return GateDecision::Suppressed;
        }

        let notification = Notification {
            chat_id: self.chat_id.clone(),
            text: candidate.to_string(),
        };

        match self.notifier.notify(&notification).await {
            Ok(()) => {
                tracing::info!(
                    "Message \"{}\" sent to chat {} via {}",
                    candidate,
                    self.chat_id,
                    self.notifier.type_name()
                );
                state.record_delivery(candidate);
                GateDecision::Delivered
            }
            Err(e) => {
                tracing::warn!(
                    "Message \"{}\" not sent to chat {}: {}",
                    candidate,
                    self.chat_id,
                    e
                );
                GateDecision::Failed
            }
        }
    }
}
