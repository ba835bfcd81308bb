//! BDD test world for the review notifier

use std::sync::Arc;

use cucumber::World;
use review_notifier::cycle::CycleReport;
use review_notifier::state::PollerState;

#[path = "doubles.rs"]
pub mod doubles;

use doubles::{ScriptedHttpClient, SwitchableNotifier};

#[derive(Debug, Default, World)]
pub struct ReviewWorld {
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub notifier: Option<Arc<SwitchableNotifier>>,

    // Single cycle testing
    pub cycle_result: Option<review_notifier::Result<CycleReport>>,

    // Scheduler testing
    pub poller_state: Option<PollerState>,
}

impl ReviewWorld {
    pub fn http(&mut self) -> Arc<ScriptedHttpClient> {
        Arc::clone(
            self.http
                .get_or_insert_with(|| Arc::new(ScriptedHttpClient::default())),
        )
    }
}
