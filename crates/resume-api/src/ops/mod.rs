//! Operational HTTP endpoints.
//!
//! - `/api/health` : liveness + store connectivity (never mutates)
//! - `/metrics`    : Prometheus text format

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::app_state::AppState;
use crate::store::with_timeout;

pub const HEALTH_ROUTE: &str = "/api/health";
pub const METRICS_ROUTE: &str = "/metrics";
pub const SERVICE_NAME: &str = "Resume API";

pub async fn health(State(app): State<AppState>) -> Response {
    let started = Instant::now();

    // "connected" means the store answers and the counter record is provisioned.
    let probe = match with_timeout(app.cfg().store.timeout(), app.store().ping()).await {
        Ok(()) => app.counter().current().await,
        Err(e) => Err(e),
    };
    let database = match probe {
        Ok(Some(_)) => "connected",
        Ok(None) => {
            tracing::warn!("health: counter record missing");
            "disconnected"
        }
        Err(e) => {
            tracing::warn!(error = %e, "health: store check failed");
            "disconnected"
        }
    };
    let status = if database == "connected" { "healthy" } else { "degraded" };

    let resp = (
        StatusCode::OK,
        Json(json!({
            "status": status,
            "timestamp": Utc::now(),
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "checks": {
                "database": database,
                "api": "operational",
            },
        })),
    )
        .into_response();

    app.metrics()
        .observe_request(HEALTH_ROUTE, resp.status().as_u16(), started.elapsed());
    resp
}

pub async fn metrics(State(app): State<AppState>) -> Response {
    let extra = [("resume_uptime_seconds", app.uptime().as_secs())];
    let body = app.metrics().render(&extra);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
