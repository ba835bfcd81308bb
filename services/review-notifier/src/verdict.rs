//! Homework status resolution and verdict rendering

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validator::json_type_name;
use crate::ReviewError;

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Fixed human text for this status
    pub fn verdict_text(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer left comments.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(ReviewError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A single homework entry from the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Extract name and status from a raw `homeworks` entry
    pub fn from_entry(entry: &Value) -> crate::Result<Self> {
        let name = match entry.get("homework_name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(ReviewError::TypeMismatch {
                    location: "\"homework_name\"".to_string(),
                    expected: "string",
                    actual: json_type_name(other),
                })
            }
            None => return Err(ReviewError::MissingKey("homework_name".to_string())),
        };

        let status = match entry.get("status") {
            Some(Value::String(raw)) => raw.parse()?,
            Some(other) => return Err(ReviewError::UnknownStatus(other.to_string())),
            None => return Err(ReviewError::MissingKey("status".to_string())),
        };

        Ok(Self { name, status })
    }

    /// Render the notification text for this homework
    pub fn verdict(&self) -> String {
        format!(
            "Review status changed for \"{}\". {}",
            self.name,
            self.status.verdict_text()
        )
    }
}

/// Resolve a raw entry straight to its verdict text
pub fn parse_status(entry: &Value) -> crate::Result<String> {
    Homework::from_entry(entry).map(|homework| homework.verdict())
}
