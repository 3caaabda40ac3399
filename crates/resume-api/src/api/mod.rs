//! Public HTTP endpoints under `/api`.
//!
//! - `visits`  : increment-and-read visit counter
//! - `contact` : contact form submissions
//! - `error`   : error -> HTTP status / JSON body mapping

pub mod contact;
pub mod error;
pub mod visits;

pub use error::ApiError;
