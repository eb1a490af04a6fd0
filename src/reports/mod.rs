//! Report pipeline: template → bind → sign → send → normalize.
//!
//! Every call is independent. The service holds only immutable settings and
//! a shared API client, so one instance serves all concurrent requests.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::binder::{self, Binder, Bindings};
use crate::client::{ApiError, ReportApi};
use crate::config::RemoteSettings;
use crate::models::{ReportRequest, SignedEnvelope};
use crate::normalize::normalize;
use crate::signature::Signer;
use crate::templates::{TemplateError, TemplateStore};

/// Errors from a report run. Each one aborts the whole request.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report '{0}' is not supported")]
    UnsupportedReportType(String),

    #[error("{field} is required")]
    Validation { field: &'static str },

    #[error("template for report '{report_type}' is not valid JSON: {source}")]
    Parse {
        report_type: String,
        source: serde_json::Error,
    },

    #[error("failed to read template for report '{report_type}': {source}")]
    Io {
        report_type: String,
        source: std::io::Error,
    },

    #[error("failed to serialize filled template: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No report data found")]
    EmptyResult,
}

impl ReportError {
    /// Whether the caller, rather than the service or remote, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ReportError::Validation { .. })
    }

    fn from_template(report_type: &str, err: TemplateError) -> Self {
        match err {
            TemplateError::Unsupported(t) => ReportError::UnsupportedReportType(t),
            TemplateError::Read { source, .. } => ReportError::Io {
                report_type: report_type.to_string(),
                source,
            },
            TemplateError::Parse(source) => ReportError::Parse {
                report_type: report_type.to_string(),
                source,
            },
        }
    }
}

/// A filled and signed template, ready to send.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedReport {
    pub report_type: String,
    /// The filled template document.
    pub template: Value,
    /// The envelope that would be posted, including `pluginData` and signature.
    pub envelope: SignedEnvelope,
}

impl PreparedReport {
    /// The serialized template text that was signed.
    pub fn plugin_data(&self) -> &str {
        &self.envelope.message.plugin_data
    }

    pub fn signature(&self) -> &str {
        &self.envelope.signature
    }
}

/// The report pipeline.
pub struct ReportService {
    remote: RemoteSettings,
    store: TemplateStore,
    binder: Binder,
    signer: Signer,
    api: Arc<dyn ReportApi>,
    today: fn() -> NaiveDate,
}

impl ReportService {
    /// Create a service from resolved settings and an API client.
    pub fn new(
        remote: RemoteSettings,
        store: TemplateStore,
        binder: Binder,
        api: Arc<dyn ReportApi>,
    ) -> Self {
        let signer = Signer::new(remote.token.clone());
        Self {
            remote,
            store,
            binder,
            signer,
            api,
            today: binder::local_today,
        }
    }

    /// Replace the clock used for "today" defaults.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Template store backing this service.
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Load, validate, bind and sign a template without sending it.
    pub async fn prepare(
        &self,
        report_type: &str,
        request: &ReportRequest,
    ) -> Result<PreparedReport, ReportError> {
        let template = self
            .store
            .load(report_type)
            .await
            .map_err(|e| ReportError::from_template(report_type, e))?;

        if self.binder.needs_client_id(&template) && request.client_number.is_none() {
            return Err(ReportError::Validation {
                field: "clientNumber",
            });
        }

        let bindings = Bindings::from_request(request, (self.today)());
        let filled = self.binder.bind(&template, report_type, &bindings);

        let plugin_data = serde_json::to_string(&filled).map_err(ReportError::Serialize)?;
        let signature = self.signer.sign(&plugin_data);
        tracing::debug!(
            report_type,
            plugin_data_len = plugin_data.len(),
            %signature,
            "template filled and signed"
        );

        let envelope = SignedEnvelope::new(&self.remote, plugin_data, signature);
        Ok(PreparedReport {
            report_type: report_type.to_string(),
            template: filled,
            envelope,
        })
    }

    /// Run the full pipeline and return the normalized report data.
    pub async fn get_report(
        &self,
        report_type: &str,
        request: &ReportRequest,
    ) -> Result<Value, ReportError> {
        let prepared = self.prepare(report_type, request).await?;

        tracing::info!(report_type, api_url = %self.remote.api_url, "sending report request");
        let response = self.api.send(&prepared.envelope).await?;

        let data = extract_report_data(&response).ok_or(ReportError::EmptyResult)?;
        Ok(normalize(data))
    }
}

/// The value at `apiRes.data`, if present and truthy.
pub fn extract_report_data(response: &Value) -> Option<&Value> {
    response
        .get("apiRes")
        .and_then(|api_res| api_res.get("data"))
        .filter(|data| is_truthy(data))
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
