//! Top-level facade crate for the resume backend.
//!
//! Re-exports the domain types and the API service so users can depend on a single crate.

pub mod core {
    pub use resume_core::*;
}

pub mod api {
    pub use resume_api::*;
}
