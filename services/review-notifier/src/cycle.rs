//! A single poll cycle: fetch, validate and resolve the latest verdict

use serde_json::Value;

use crate::api::{check_denial, ReviewApi};
use crate::validator::check_response;
use crate::verdict::parse_status;
use crate::ReviewError;

/// Message reported when the API returns no homework changes
pub const NO_VERDICTS: &str = "No new verdicts for submitted homework";

/// Longest text Telegram accepts in a single message
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Outcome of a successful cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Verdict text, or [`NO_VERDICTS`]
    pub message: String,
    /// Server-supplied `current_date`, if it was an integer
    pub current_date: Option<i64>,
}

/// Run one cycle against `api` using `since` as `from_date`.
///
/// A denial signature fails the cycle before the payload shape is checked.
/// Only `homeworks[0]` is resolved; the API orders entries newest first.
pub async fn run_cycle(api: &dyn ReviewApi, since: i64) -> crate::Result<CycleReport> {
    let payload = api.fetch_statuses(since).await?;
    check_denial(&payload)?;
    let homeworks = check_response(&payload)?;

    let message = match homeworks.first() {
        Some(latest) => parse_status(latest)?,
        None => NO_VERDICTS.to_string(),
    };

    let current_date = payload.get("current_date").and_then(Value::as_i64);
    if current_date.is_none() {
        tracing::debug!("Response carried no integer current_date");
    }

    Ok(CycleReport {
        message,
        current_date,
    })
}

/// Render a failed cycle as a chat message, cut to [`MAX_MESSAGE_CHARS`]
pub fn failure_message(error: &ReviewError) -> String {
    truncate_message(format!("Program failure: {}", error))
}

fn truncate_message(mut text: String) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text;
    }
    if let Some((cut, _)) = text.char_indices().nth(MAX_MESSAGE_CHARS - 1) {
        text.truncate(cut);
        text.push('…');
    }
    text
}
