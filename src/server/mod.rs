//! HTTP dispatcher for the report pipeline.
//!
//! Routes:
//! - `POST /reports/:type` runs the pipeline with the JSON body as payload
//! - `GET /health` reports liveness
//!
//! Failures become `{"error": "<message>"}` with 400 for caller mistakes and
//! 500 for everything else.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tracing::Instrument;

use crate::models::ReportRequest;
use crate::reports::ReportService;

/// Build the dispatcher router around a shared pipeline.
pub fn router(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/reports/:type", post(handle_report))
        .with_state(service)
}

/// Serve on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, service: Arc<ReportService>) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "report relay listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("report relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": crate::constants::APP_NAME,
        "version": crate::constants::VERSION,
    }))
}

/// Run one report request.
///
/// An empty body is treated as `{}`; the pipeline decides which fields the
/// chosen template actually needs.
async fn handle_report(
    State(service): State<Arc<ReportService>>,
    Path(report_type): Path<String>,
    body: Bytes,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("report", %request_id, report_type = %report_type);

    async move {
        let request = match parse_body(&body) {
            Ok(request) => request,
            Err(message) => {
                tracing::warn!("rejected request body: {message}");
                return error_response(StatusCode::BAD_REQUEST, message);
            }
        };

        tracing::info!("report requested");
        match service.get_report(&report_type, &request).await {
            Ok(data) => {
                tracing::info!("report delivered");
                (StatusCode::OK, Json(data)).into_response()
            }
            Err(err) => {
                let status = if err.is_client_error() {
                    tracing::warn!(status = 400, "report error: {err}");
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(status = 500, "report error: {err}");
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                error_response(status, err.to_string())
            }
        }
    }
    .instrument(span)
    .await
}

fn parse_body(body: &[u8]) -> Result<ReportRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReportRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {e}"))
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
