//! In-memory poller state: checkpoint, dedup key and failure count

/// Consecutive failed cycles after which a warning is logged
pub const FAILURE_WARN_THRESHOLD: u32 = 5;

/// Dedup state for the notification gate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    last_emitted: Option<String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the last successfully delivered notification
    pub fn last_emitted(&self) -> Option<&str> {
        self.last_emitted.as_deref()
    }

    /// True if `candidate` equals the last delivered content
    pub fn is_repeat(&self, candidate: &str) -> bool {
        self.last_emitted.as_deref() == Some(candidate)
    }

    pub(crate) fn record_delivery(&mut self, candidate: &str) {
        self.last_emitted = Some(candidate.to_string());
    }
}

/// State owned by the scheduler for the lifetime of the process
#[derive(Debug, Clone)]
pub struct PollerState {
    /// `from_date` sent on the next request (Unix seconds)
    pub checkpoint: i64,
    pub notifications: NotificationState,
    pub consecutive_failures: u32,
}

impl PollerState {
    pub fn new(checkpoint: i64) -> Self {
        Self {
            checkpoint,
            notifications: NotificationState::new(),
            consecutive_failures: 0,
        }
    }

    /// Record a successful cycle, advancing the checkpoint to the server's value
    pub fn record_success(&mut self, current_date: Option<i64>) {
        self.consecutive_failures = 0;
        if let Some(current_date) = current_date {
            self.checkpoint = current_date;
        }
    }

    /// Record a failed cycle, returning the consecutive failure count
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }
}
