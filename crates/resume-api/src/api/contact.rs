//! Contact form endpoint.
//!
//! Validates the submission, stamps it with an id, time, and origin address,
//! and appends it to the messages collection. Messages are never read back.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use resume_core::error::{Result, ResumeError};
use resume_core::model::{ContactMessage, ContactRequest};

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::store::with_timeout;

pub const ROUTE: &str = "/api/contact";
pub const MSG_THANKS: &str = "Thank you for your message! I'll get back to you soon.";
const UNKNOWN_ADDR: &str = "unknown";

pub async fn submit(
    State(app): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let ip = origin_address(&headers, peer.map(|ConnectInfo(addr)| addr));

    let resp = match accept(&app, &body, ip).await {
        Ok(msg) => {
            tracing::info!(id = %msg.id, email = %msg.email, "contact message saved");
            app.metrics()
                .contact_submissions
                .inc(&[("outcome", "accepted")]);
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": MSG_THANKS,
                    "id": msg.id,
                })),
            )
                .into_response()
        }
        Err(e) => {
            let outcome = if matches!(e, ResumeError::Validation(_)) {
                tracing::debug!(error = %e, "contact submission rejected");
                "rejected"
            } else {
                tracing::warn!(error = %e, "contact submission failed");
                app.metrics().store_errors.inc(&[("kind", e.kind())]);
                "failed"
            };
            app.metrics()
                .contact_submissions
                .inc(&[("outcome", outcome)]);
            ApiError::from(e).into_response()
        }
    };

    app.metrics()
        .observe_request(ROUTE, resp.status().as_u16(), started.elapsed());
    resp
}

async fn accept(app: &AppState, body: &[u8], ip: String) -> Result<ContactMessage> {
    let contact = ContactRequest::from_json(body)?.validate()?;
    let msg = ContactMessage::new(contact, Uuid::new_v4().to_string(), Utc::now(), ip);

    let store = &app.cfg().store;
    let write = app
        .store()
        .create(&store.messages_collection, &msg.id, msg.to_document()?);
    with_timeout(store.timeout(), write).await?;

    Ok(msg)
}

/// First `X-Forwarded-For` hop, then the peer socket, then "unknown".
fn origin_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match (forwarded, peer) {
        (Some(f), _) => f.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => UNKNOWN_ADDR.to_string(),
    }
}
