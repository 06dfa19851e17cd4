//! Entry Factory Module
//!
//! Mints cache entries for a pool from a shared clock and configuration.

use tracing::debug;

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::entry::CacheEntry;
use crate::config::Config;

// == Entry Factory ==
/// Builds entries that share one clock and carry the configured default TTL.
#[derive(Debug, Clone)]
pub struct EntryFactory<C = SystemClock> {
    config: Config,
    clock: C,
}

impl EntryFactory<SystemClock> {
    // == Constructor ==
    /// Creates a factory reading time from the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a factory from environment configuration.
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }
}

impl<C: Clock + Clone> EntryFactory<C> {
    /// Creates a factory reading time from `clock`.
    pub fn with_clock(config: Config, clock: C) -> Self {
        Self { config, clock }
    }

    /// Returns the configuration entries are built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // == Entry ==
    /// Builds an entry for a lookup that found `value`.
    pub fn entry<V>(&self, key: impl Into<String>, value: V) -> CacheEntry<V, C> {
        let key = key.into();
        debug!(key = %key, "Building cache item");
        CacheEntry::with_clock(key, value, self.clock.clone())
            .with_default_ttl(self.config.default_ttl)
    }

    // == Miss ==
    /// Builds an entry for a lookup that failed.
    pub fn miss<V>(&self, key: impl Into<String>, value: V) -> CacheEntry<V, C> {
        let key = key.into();
        debug!(key = %key, "Building cache miss");
        CacheEntry::miss_with_clock(key, value, self.clock.clone())
            .with_default_ttl(self.config.default_ttl)
    }
}

impl Default for EntryFactory<SystemClock> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
