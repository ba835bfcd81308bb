//! Review API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::RequestContext;
use crate::io::HttpClient;
use crate::ReviewError;

/// The only status code accepted from the review API
const HTTP_OK: u16 = 200;

/// Payload keys that mark a refusal from the remote service
const DENIAL_KEYS: &[&str] = &["error", "code"];

/// Source of homework status payloads
#[async_trait]
pub trait ReviewApi: Send + Sync + std::fmt::Debug {
    /// Fetch statuses changed since `since` (Unix seconds).
    ///
    /// Returns the decoded payload as-is; denial and shape checks belong to
    /// the caller.
    async fn fetch_statuses(&self, since: i64) -> crate::Result<Value>;
}

/// Fail with `ServiceDenial` if the payload carries `error` or `code`
pub fn check_denial(payload: &Value) -> crate::Result<()> {
    let Some(object) = payload.as_object() else {
        return Ok(());
    };

    let details: Vec<String> = DENIAL_KEYS
        .iter()
        .filter_map(|key| object.get(*key).map(|value| format!("{}: {}", key, value)))
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(ReviewError::ServiceDenial(details.join(", ")))
    }
}

/// Client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &ApiConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.token),
            http,
        }
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn fetch_statuses(&self, since: i64) -> crate::Result<Value> {
        let from_date = since.to_string();
        let headers = [("Authorization", self.authorization.as_str())];
        let query = [("from_date", from_date.as_str())];

        tracing::info!(
            "Requesting homework statuses from {} with from_date={}",
            self.endpoint,
            since
        );

        let response = self.http.get(&self.endpoint, &headers, &query).await?;

        if response.status != HTTP_OK {
            return Err(ReviewError::HttpStatus {
                status: response.status,
                request: RequestContext::new(&self.endpoint, &headers, &query),
            });
        }

        let payload: Value =
            serde_json::from_str(&response.body).map_err(|e| ReviewError::Decode {
                message: e.to_string(),
                request: RequestContext::new(&self.endpoint, &headers, &query),
            })?;

        Ok(payload)
    }
}
