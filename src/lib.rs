//! Cache Item - a cache entry value object
//!
//! Provides a key/value cache item with lazy, memoized TTL validity that a
//! cache pool can construct, hand to callers and consume again.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{CacheEntry, CacheItem, EntryFactory, ExpiresAfter, ExpiresAt};
pub use config::Config;
pub use error::{CacheItemError, Result};
