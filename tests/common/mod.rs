//! Shared helpers for integration tests: a canned `ReportApi` and a
//! service wired to the fixture templates.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use report_relay::binder::Binder;
use report_relay::client::{ApiError, ReportApi};
use report_relay::config::{BindingConfig, RemoteSettings};
use report_relay::models::SignedEnvelope;
use report_relay::reports::ReportService;
use report_relay::templates::TemplateStore;

pub const TOKEN: &str = "3EFE2B45E8407700AB4D20324B7D001B";

/// What the mock API answers with.
pub enum Canned {
    Ok(Value),
    Remote(u16, String),
    Network,
}

/// A mock reporting API that records every envelope it receives.
pub struct MockApi {
    canned: Canned,
    sent: Mutex<Vec<SignedEnvelope>>,
}

impl MockApi {
    pub fn new(canned: Canned) -> Arc<Self> {
        Arc::new(Self {
            canned,
            sent: Mutex::new(Vec::new()),
        })
    }

    /// A mock answering `{"apiRes": {"data": data}}`.
    pub fn with_data(data: Value) -> Arc<Self> {
        Self::new(Canned::Ok(serde_json::json!({ "apiRes": { "data": data } })))
    }

    pub fn sent(&self) -> Vec<SignedEnvelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportApi for MockApi {
    async fn send(&self, envelope: &SignedEnvelope) -> Result<Value, ApiError> {
        self.sent.lock().unwrap().push(envelope.clone());
        match &self.canned {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Remote(status, body) => Err(ApiError::Remote {
                status: *status,
                body: body.clone(),
            }),
            Canned::Network => Err(ApiError::Network("connection refused".to_string())),
        }
    }
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reports")
}

pub fn remote(api_url: &str) -> RemoteSettings {
    RemoteSettings {
        api_url: api_url.to_string(),
        token: TOKEN.to_string(),
        station: "fb3a7767-b991-42b8-8eb0-6d635901e01b".to_string(),
        company: "okelbro".to_string(),
        net_passport_id: "35893".to_string(),
    }
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Formatted form of [`fixed_today`].
pub const TODAY: &str = "10/16/2026";

/// A service over the fixture templates with a pinned clock.
pub fn service(api: Arc<dyn ReportApi>) -> ReportService {
    ReportService::new(
        remote("https://reports.example.test/api"),
        TemplateStore::new(fixtures_dir()),
        Binder::new(&BindingConfig::default()),
        api,
    )
    .with_clock(fixed_today)
}
