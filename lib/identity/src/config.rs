//! Identity provider connection settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for reaching the identity provider's public API.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the provider's public API (e.g., "http://kratos:4433").
    /// Default: "http://localhost:4433"
    #[serde(default = "default_public_url")]
    public_url: String,
    /// Per-call timeout in seconds.
    /// Default: 30
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

fn default_public_url() -> String {
    "http://localhost:4433".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            public_url: default_public_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl IdentityConfig {
    /// Creates a configuration for the given base URL with the default timeout.
    #[must_use]
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Overrides the per-call timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Returns the provider base URL without a trailing slash.
    #[must_use]
    pub fn public_url(&self) -> &str {
        self.public_url.trim_end_matches('/')
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
