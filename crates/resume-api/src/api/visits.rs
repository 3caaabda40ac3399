//! Visit counter endpoint.
//!
//! Every call records a visit, whatever the method: the page issues GET, and
//! older deployments of the page issued POST.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ApiError;
use crate::app_state::AppState;

pub const ROUTE: &str = "/api/getResumeFunction";
/// Spelling used by the page when pointed at a local function host.
pub const ROUTE_LOCAL: &str = "/api/GetResumeFunction";

pub async fn record_visit(
    State(app): State<AppState>,
    path: MatchedPath,
    method: Method,
) -> Response {
    let started = Instant::now();

    let resp = match app.counter().increment().await {
        Ok(counter) => {
            tracing::info!(%method, count = counter.count, "visit recorded");
            (StatusCode::OK, Json(counter)).into_response()
        }
        Err(e) => {
            tracing::warn!(%method, error = %e, "visit count failed");
            app.metrics().store_errors.inc(&[("kind", e.kind())]);
            ApiError::from(e).into_response()
        }
    };

    app.metrics()
        .observe_request(path.as_str(), resp.status().as_u16(), started.elapsed());
    resp
}
