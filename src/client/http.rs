//! reqwest-backed [`ReportApi`] implementation.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::{ApiError, ReportApi};
use crate::models::SignedEnvelope;

/// Posts envelopes to the configured API endpoint.
///
/// The underlying `reqwest::Client` keeps its connection pool across
/// requests; no timeout is set beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpReportApi {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpReportApi {
    /// Create a client for `api_url`.
    pub fn new(api_url: &str) -> Result<Self, ApiError> {
        let url = reqwest::Url::parse(api_url)
            .map_err(|e| ApiError::Setup(format!("invalid API URL '{api_url}': {e}")))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("report-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

#[async_trait]
impl ReportApi for HttpReportApi {
    async fn send(&self, envelope: &SignedEnvelope) -> Result<Value, ApiError> {
        let body = serde_json::to_vec(envelope).map_err(|e| ApiError::Setup(e.to_string()))?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "API responded");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %e,
                        "failed to read API error body"
                    );
                    format!("<unreadable body: {e}>")
                }
            };
            return Err(ApiError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Map a transport error to setup vs. network failure.
fn classify_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() || err.is_redirect() {
        ApiError::Setup(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}
