//! Configuration Module
//!
//! Handles loading entry defaults from environment variables.

use std::env;

/// Environment variable holding the default TTL in seconds.
pub const DEFAULT_TTL_VAR: &str = "CACHE_ITEM_DEFAULT_TTL";

/// Cache item configuration parameters.
///
/// All values can be configured via environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// TTL in seconds applied when `expires_after` receives no value.
    /// `None` means such a call expires the entry immediately.
    pub default_ttl: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ITEM_DEFAULT_TTL` - Default TTL in seconds (default: unset)
    pub fn from_env() -> Self {
        Self {
            default_ttl: env::var(DEFAULT_TTL_VAR)
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Returns a copy of this config with the given default TTL.
    pub fn with_default_ttl(mut self, seconds: u64) -> Self {
        self.default_ttl = Some(seconds);
        self
    }
}
