//! HTTP mapping for `ResumeError`.
//!
//! Clients get a status, a stable code, and a short message. Internal detail
//! stays in the logs.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use resume_core::error::{ClientCode, ResumeError};

pub const MSG_TRY_AGAIN: &str = "Service temporarily unavailable, please try again.";
pub const MSG_INTERNAL: &str = "Internal server error.";

/// Seconds advertised in `Retry-After` for transient failures.
const RETRY_AFTER_SECS: &str = "1";

#[derive(Debug)]
pub struct ApiError(pub ResumeError);

impl From<ResumeError> for ApiError {
    fn from(e: ResumeError) -> Self {
        Self(e)
    }
}

impl ApiError {
    /// NotFound is also a 503: the counter is a provisioning gap, so visitors
    /// get the same "try again" answer, but only transient failures advertise
    /// `Retry-After`.
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::NotFound | ClientCode::Conflict | ClientCode::Unavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a visitor.
    pub fn public_message(&self) -> String {
        match &self.0 {
            ResumeError::Validation(msg) => msg.clone(),
            ResumeError::Internal(_) => MSG_INTERNAL.to_string(),
            _ => MSG_TRY_AGAIN.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.public_message(),
            "code": self.0.client_code().as_str(),
        }));

        if self.0.is_transient() {
            (status, [(header::RETRY_AFTER, RETRY_AFTER_SECS)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
