//! ReportApi trait and the remote reporting API integration.
//!
//! The pipeline talks to the remote service only through [`ReportApi`], so
//! tests can swap in a canned implementation.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::SignedEnvelope;

/// Errors from the remote reporting API.
///
/// Each variant is a distinct failure kind: the remote answered with an
/// error, nothing answered, or the request never left.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed with HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("network error: no response received from API ({0})")]
    Network(String),

    #[error("request setup error: {0}")]
    Setup(String),

    #[error("API returned a response that is not JSON: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of a remote error response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends a signed envelope and returns the remote response body.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Perform exactly one request. No retries.
    async fn send(&self, envelope: &SignedEnvelope) -> Result<Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_carries_status_and_body() {
        let err = ApiError::Remote {
            status: 403,
            body: "{\"error\":\"bad signature\"}".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("bad signature"));
    }

    #[test]
    fn non_remote_errors_have_no_status() {
        assert_eq!(ApiError::Network("refused".into()).status(), None);
        assert_eq!(ApiError::Setup("bad url".into()).status(), None);
    }
}
