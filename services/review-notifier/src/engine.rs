//! Engine: drives poll cycles on a fixed interval and routes their outcome
//! through the notification gate

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::ReviewApi;
use crate::cycle::{failure_message, run_cycle};
use crate::gate::{GateDecision, NotificationGate};
use crate::state::{PollerState, FAILURE_WARN_THRESHOLD};

/// The engine runs one poll cycle at a time until cancelled
pub struct Engine {
    api: Arc<dyn ReviewApi>,
    gate: NotificationGate,
    interval: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        gate: NotificationGate,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            gate,
            interval,
            cancel,
        }
    }

    /// Run a single cycle and offer its outcome to the gate
    pub async fn tick(&self, state: &mut PollerState) -> GateDecision {
        let since = state.checkpoint;

        let candidate = match run_cycle(self.api.as_ref(), since).await {
            Ok(report) => {
                state.record_success(report.current_date);
                tracing::debug!(
                    "Cycle succeeded: from_date {} -> {}",
                    since,
                    state.checkpoint
                );
                report.message
            }
            Err(e) => {
                let failures = state.record_failure();
                tracing::warn!(kind = e.kind(), "Poll cycle failed: {}", e);
                if failures == FAILURE_WARN_THRESHOLD {
                    tracing::warn!("{} consecutive poll cycles have failed", failures);
                }
                failure_message(&e)
            }
        };

        let decision = self.gate.offer(&mut state.notifications, &candidate).await;
        if decision == GateDecision::Suppressed {
            tracing::info!("No changes since the last notification");
        }
        decision
    }

    /// Poll until the cancellation token is triggered.
    ///
    /// The first cycle runs immediately; cancellation is observed between cycles.
    pub async fn run(&self, state: &mut PollerState) {
        tracing::info!(
            "Polling every {:?}, starting from_date {}",
            self.interval,
            state.checkpoint
        );

        loop {
            self.tick(state).await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}
