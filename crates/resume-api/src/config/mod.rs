//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use resume_core::error::{Result, ResumeError};

pub use schema::{ApiConfig, ServerSection, StoreSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RESUME_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "resume.yaml";

pub fn load_from_file(path: &str) -> Result<ApiConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ResumeError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ApiConfig> {
    let cfg: ApiConfig = serde_yaml::from_str(s)
        .map_err(|e| ResumeError::Validation(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Path from `RESUME_CONFIG`, falling back to `resume.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
