//! Integration tests for the report pipeline with a mock API.
//!
//! Uses the fixture templates under `tests/fixtures/reports/`.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{Canned, MockApi, TODAY, TOKEN};
use report_relay::client::ApiError;
use report_relay::models::ReportRequest;
use report_relay::reports::ReportError;
use report_relay::signature;

#[tokio::test]
async fn customer_balance_end_to_end() {
    let api = MockApi::with_data(json!([{"client": "38611", "balance": "1520.5"}]));
    let service = common::service(api.clone());

    let data = service
        .get_report("181", &ReportRequest::for_client("38611"))
        .await
        .expect("report should succeed");
    assert_eq!(data, json!([{"client": "38611", "balance": "1520.50"}]));

    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    let envelope = &sent[0];

    let filled: serde_json::Value = serde_json::from_str(&envelope.message.plugin_data).unwrap();
    assert_eq!(filled["params_data"][0]["defVal"], "38611");
    assert_eq!(filled["params_data"][1]["defVal"], TODAY);
    assert_eq!(filled["title"], "Customer balance");

    assert_eq!(
        envelope.signature,
        signature::sign(&envelope.message.plugin_data, TOKEN)
    );
    assert_eq!(envelope.plugin, "reports");
    assert_eq!(envelope.company, "okelbro");
    assert_eq!(envelope.message.net_passport_id, "35893");
}

#[tokio::test]
async fn plugin_data_keeps_template_key_order() {
    let api = MockApi::with_data(json!({"ok": true}));
    let service = common::service(api.clone());
    let prepared = service
        .prepare("181", &ReportRequest::for_client("38611"))
        .await
        .unwrap();

    assert!(prepared.plugin_data().starts_with(r#"{"report_id":181,"title":"Customer balance","params_data":["#));
    assert!(api.sent().is_empty(), "prepare must not call the API");
}

#[tokio::test]
async fn unsupported_report_type() {
    let api = MockApi::with_data(json!({"ok": true}));
    let service = common::service(api.clone());

    let err = service
        .get_report("999", &ReportRequest::for_client("38611"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::UnsupportedReportType(ref t) if t == "999"));
    assert_eq!(err.to_string(), "Report '999' is not supported");
    assert!(api.sent().is_empty());
}

#[tokio::test]
async fn traversal_report_type_is_unsupported() {
    let api = MockApi::with_data(json!({"ok": true}));
    let service = common::service(api.clone());

    let err = service
        .get_report("../reports/181", &ReportRequest::for_client("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::UnsupportedReportType(_)));
}

#[tokio::test]
async fn missing_client_number_fails_before_network() {
    let api = MockApi::with_data(json!({"ok": true}));
    let service = common::service(api.clone());

    let err = service
        .get_report("181", &ReportRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Validation { field: "clientNumber" }));
    assert_eq!(err.to_string(), "clientNumber is required");
    assert!(api.sent().is_empty());
}

#[tokio::test]
async fn template_without_client_slot_needs_no_client_number() {
    let api = MockApi::with_data(json!({"total": 3}));
    let service = common::service(api.clone());

    let data = service
        .get_report("summary", &ReportRequest::default())
        .await
        .unwrap();
    assert_eq!(data, json!({"total": 3}));

    let sent = api.sent();
    let filled: serde_json::Value = serde_json::from_str(&sent[0].message.plugin_data).unwrap();
    assert_eq!(
        filled,
        json!({"report_id": 12, "title": "Daily summary", "columns": ["total", "count"]})
    );
}

#[tokio::test]
async fn invoice_report_binds_document_number_and_range() {
    let api = MockApi::with_data(json!({"ok": true}));
    let service = common::service(api.clone());
    let request = ReportRequest {
        client_number: Some("38611".to_string()),
        date_from: Some("01/01/2026".to_string()),
        date_to: None,
        invoice_number: Some("90017".to_string()),
    };

    let prepared = service.prepare("invoice", &request).await.unwrap();
    let params = &prepared.template["params_data"];
    assert_eq!(params[0]["defVal"], "38611");
    assert_eq!(params[1]["defVal"], "90017");
    assert_eq!(params[2]["defVal"], "0", "non-matching label is untouched");
    assert_eq!(params[3]["defVal"], "01/01/2026");
    assert_eq!(params[4]["defVal"], TODAY);
}

#[tokio::test]
async fn broken_template_is_a_parse_error() {
    let api = MockApi::with_data(json!({"ok": true}));
    let service = common::service(api.clone());

    let err = service
        .get_report("broken", &ReportRequest::for_client("1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Parse { .. }));
    assert!(api.sent().is_empty());
}

#[tokio::test]
async fn remote_error_is_propagated() {
    let api = MockApi::new(Canned::Remote(401, "bad signature".to_string()));
    let service = common::service(api);

    let err = service
        .get_report("181", &ReportRequest::for_client("38611"))
        .await
        .unwrap_err();
    match err {
        ReportError::Api(ApiError::Remote { status, ref body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad signature");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn network_error_is_propagated() {
    let api = MockApi::new(Canned::Network);
    let service = common::service(api);

    let err = service
        .get_report("181", &ReportRequest::for_client("38611"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::Api(ApiError::Network(_))));
}

#[tokio::test]
async fn missing_data_is_empty_result() {
    let api = MockApi::new(Canned::Ok(json!({"apiRes": {"data": null}, "status": "ok"})));
    let service = common::service(api);

    let err = service
        .get_report("181", &ReportRequest::for_client("38611"))
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::EmptyResult));
    assert_eq!(err.to_string(), "No report data found");
}

#[tokio::test]
async fn response_is_normalized() {
    let api = MockApi::with_data(json!({
        "due": "2024-03-05T00:00:00.000Z",
        "amount": "123.4",
        "count": 7
    }));
    let service = common::service(api);

    let data = service
        .get_report("181", &ReportRequest::for_client("38611"))
        .await
        .unwrap();
    assert_eq!(data, json!({"due": "03/05/2024", "amount": "123.40", "count": 7}));
}

#[tokio::test]
async fn identical_requests_produce_identical_signatures() {
    let service = common::service(MockApi::with_data(json!({"ok": true})));
    let a = service.prepare("181", &ReportRequest::for_client("38611")).await.unwrap();
    let b = service.prepare("181", &ReportRequest::for_client("38611")).await.unwrap();
    let c = service.prepare("181", &ReportRequest::for_client("38612")).await.unwrap();
    assert_eq!(a.signature(), b.signature());
    assert_ne!(a.signature(), c.signature());
}
