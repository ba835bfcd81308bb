//! Error types for the review notifier

use std::fmt;

/// Header names whose values never appear in diagnostics
const SENSITIVE_HEADERS: &[&str] = &["authorization"];

/// Request details attached to transport-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

impl RequestContext {
    /// Build a context, redacting credential-bearing header values
    pub fn new(endpoint: &str, headers: &[(&str, &str)], params: &[(&str, &str)]) -> Self {
        let headers = headers
            .iter()
            .map(|(name, value)| {
                let value = if SENSITIVE_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                    "<redacted>".to_string()
                } else {
                    value.to_string()
                };
                (name.to_string(), value)
            })
            .collect();
        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            endpoint: redact_endpoint(endpoint),
            headers,
            params,
        }
    }
}

/// Mask Telegram-style `bot<id>:<secret>` path segments
fn redact_endpoint(endpoint: &str) -> String {
    endpoint
        .split('/')
        .map(|segment| {
            if segment.starts_with("bot") && segment.contains(':') {
                "bot<redacted>"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint \"{}\", headers {{", self.endpoint)?;
        write_pairs(f, &self.headers)?;
        write!(f, "}}, params {{")?;
        write_pairs(f, &self.params)?;
        write!(f, "}}")
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(String, String)]) -> fmt::Result {
    for (i, (k, v)) in pairs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", k, v)?;
    }
    Ok(())
}

/// Errors that can occur in the review notifier
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Connection failed: {message} ({request})")]
    ConnectionFailure {
        message: String,
        request: RequestContext,
    },

    #[error("Missing or malformed URL: {message} ({request})")]
    MissingUrl {
        message: String,
        request: RequestContext,
    },

    #[error("Request timed out: {message} ({request})")]
    Timeout {
        message: String,
        request: RequestContext,
    },

    #[error("Failed to decode API response as JSON: {message} ({request})")]
    Decode {
        message: String,
        request: RequestContext,
    },

    #[error("API returned HTTP status {status} ({request})")]
    HttpStatus { status: u16, request: RequestContext },

    #[error("API refused the request: {0}")]
    ServiceDenial(String),

    #[error("Unexpected type of {location}: expected {expected}, got {actual}")]
    TypeMismatch {
        location: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Missing key \"{0}\" in API response")]
    MissingKey(String),

    #[error("Unknown homework status in API response: {0}")]
    UnknownStatus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReviewError {
    /// Stable tag for the error kind, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewError::ConnectionFailure { .. } => "connection_failure",
            ReviewError::MissingUrl { .. } => "missing_url",
            ReviewError::Timeout { .. } => "timeout",
            ReviewError::Decode { .. } => "decode_failure",
            ReviewError::HttpStatus { .. } => "http_status",
            ReviewError::ServiceDenial(_) => "service_denial",
            ReviewError::TypeMismatch { .. } => "type_mismatch",
            ReviewError::MissingKey(_) => "missing_key",
            ReviewError::UnknownStatus(_) => "unknown_status",
            ReviewError::Config(_) => "configuration_missing",
            ReviewError::Delivery(_) => "delivery",
            ReviewError::Io(_) => "io",
            ReviewError::Json(_) => "json",
        }
    }
}

/// Result type alias for review notifier operations
pub type Result<T> = std::result::Result<T, ReviewError>;
