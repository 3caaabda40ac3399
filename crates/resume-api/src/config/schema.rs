use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use resume_core::error::{Result, ResumeError};
use resume_core::model::counter::DEFAULT_COUNTER_ID;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ResumeError::Validation(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Allow cross-origin calls from the static page host.
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors: default_cors(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ResumeError::Validation(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_counter_collection")]
    pub counter_collection: String,

    #[serde(default = "default_counter_id")]
    pub counter_id: String,

    #[serde(default = "default_messages_collection")]
    pub messages_collection: String,

    /// Total read-modify-write attempts per increment, first try included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Upper bound for a single store round-trip.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// When set, the counter record is created with this value at boot if it
    /// does not exist yet.
    #[serde(default)]
    pub seed_count: Option<u64>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            counter_collection: default_counter_collection(),
            counter_id: default_counter_id(),
            messages_collection: default_messages_collection(),
            max_attempts: default_max_attempts(),
            timeout_ms: default_timeout_ms(),
            seed_count: None,
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        for (field, v) in [
            ("store.counter_collection", &self.counter_collection),
            ("store.counter_id", &self.counter_id),
            ("store.messages_collection", &self.messages_collection),
        ] {
            if v.trim().is_empty() {
                return Err(ResumeError::Validation(format!("{field} must not be empty")));
            }
        }
        if self.counter_collection == self.messages_collection {
            return Err(ResumeError::Validation(
                "store.counter_collection and store.messages_collection must differ".into(),
            ));
        }
        if !(1..=100).contains(&self.max_attempts) {
            return Err(ResumeError::Validation(
                "store.max_attempts must be between 1 and 100".into(),
            ));
        }
        if !(50..=60000).contains(&self.timeout_ms) {
            return Err(ResumeError::Validation(
                "store.timeout_ms must be between 50 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:7071".into()
}
fn default_cors() -> bool {
    true
}
fn default_counter_collection() -> String {
    "Counter".into()
}
fn default_counter_id() -> String {
    DEFAULT_COUNTER_ID.into()
}
fn default_messages_collection() -> String {
    "Messages".into()
}
fn default_max_attempts() -> u32 {
    5
}
fn default_timeout_ms() -> u64 {
    2000
}
