use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

fn default_timeout_secs() -> u64 {
    30
}

fn default_read_attempts() -> u32 {
    3
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    /// API root, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many times a GET is attempted when no response arrives.
    /// Mutations are never retried.
    #[serde(default = "default_read_attempts")]
    pub read_attempts: u32,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            version: 1,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: default_timeout_secs(),
            read_attempts: default_read_attempts(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Durable key-value client storage (`state.json`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}
