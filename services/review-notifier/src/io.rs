//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{RequestContext, ReviewError};

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests fail with `Timeout` after `timeout`
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

fn parse_url(url: &str, request: &RequestContext) -> crate::Result<reqwest::Url> {
    reqwest::Url::parse(url).map_err(|e| ReviewError::MissingUrl {
        message: e.to_string(),
        request: request.clone(),
    })
}

/// Map a reqwest failure onto the transport error kinds
fn classify(method: &str, e: reqwest::Error, request: &RequestContext) -> ReviewError {
    let request = request.clone();
    let is_timeout = e.is_timeout();
    let is_builder = e.is_builder();
    let message = format!("{} failed: {}", method, e.without_url());

    if is_timeout {
        ReviewError::Timeout { message, request }
    } else if is_builder {
        ReviewError::MissingUrl { message, request }
    } else {
        ReviewError::ConnectionFailure { message, request }
    }
}

async fn into_response(
    method: &str,
    response: reqwest::Response,
    request: &RequestContext,
) -> crate::Result<HttpResponse> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| classify(method, e, request))?;

    tracing::debug!(
        "{} {} -> {} ({} bytes)",
        method,
        request.endpoint,
        status,
        body.len()
    );
    Ok(HttpResponse { status, body })
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let request = RequestContext::new(url, headers, query);
        tracing::debug!("GET {}", request);
        let target = parse_url(url, &request)?;

        let mut builder = self.client.get(target).query(query);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify("GET", e, &request))?;
        into_response("GET", response, &request).await
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        let request = RequestContext::new(url, &[], &[]);
        tracing::debug!("POST {}", request.endpoint);
        let target = parse_url(url, &request)?;

        let response = self
            .client
            .post(target)
            .form(params)
            .send()
            .await
            .map_err(|e| classify("POST", e, &request))?;
        into_response("POST", response, &request).await
    }
}
