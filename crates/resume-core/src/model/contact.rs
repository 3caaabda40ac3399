//! Contact form input and the stored message record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ResumeError};

pub const DEFAULT_SUBJECT: &str = "Contact Form Submission";

pub const MSG_REQUIRED: &str = "Name, email, and message are required.";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address.";
pub const MSG_INVALID_JSON: &str = "Request body must be valid JSON.";
pub const MSG_NOT_STRINGS: &str = "Contact fields must be strings.";
pub const MSG_NOT_OBJECT: &str = "Request body must be a JSON object.";

/// Raw submission as posted by the page. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A submission that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// Decode a request body. An empty body or JSON `null` is treated as a
    /// submission with every field missing.
    pub fn from_json(body: &[u8]) -> Result<ContactRequest> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ContactRequest::default());
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| ResumeError::Validation(MSG_INVALID_JSON.into()))?;

        match value {
            Value::Null => Ok(ContactRequest::default()),
            obj @ Value::Object(_) => serde_json::from_value(obj)
                .map_err(|_| ResumeError::Validation(MSG_NOT_STRINGS.into())),
            _ => Err(ResumeError::Validation(MSG_NOT_OBJECT.into())),
        }
    }

    pub fn validate(self) -> Result<ValidContact> {
        let (Some(name), Some(email), Some(message)) = (
            present(self.name),
            present(self.email),
            present(self.message),
        ) else {
            return Err(ResumeError::Validation(MSG_REQUIRED.into()));
        };

        if !looks_like_email(&email) {
            return Err(ResumeError::Validation(MSG_INVALID_EMAIL.into()));
        }

        let subject = present(self.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

        Ok(ValidContact {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message,
        })
    }
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Minimal shape check: an `@` and a `.` somewhere.
fn looks_like_email(s: &str) -> bool {
    s.contains('@') && s.contains('.')
}

/// Append-only record written once per accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
}

impl ContactMessage {
    pub fn new(
        contact: ValidContact,
        id: String,
        timestamp: DateTime<Utc>,
        ip_address: String,
    ) -> Self {
        Self {
            id,
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            timestamp,
            ip_address,
        }
    }

    pub fn to_document(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| ResumeError::Internal(format!("encode contact message failed: {e}")))
    }
}
