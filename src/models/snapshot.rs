//! Entry snapshot model
//!
//! Read-only, serializable view of a cache entry's state.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Serializable view of a cache entry.
///
/// Produced by [`crate::cache::CacheEntry::snapshot`]; the value is only
/// present when the entry is a hit.
#[derive(Debug, Serialize)]
pub struct EntrySnapshot<'a, V> {
    /// The entry key
    pub key: &'a str,
    /// Type tag of the item
    pub item_type: &'static str,
    /// Memoized hit state
    pub hit: bool,
    /// Whether the entry was built as a miss
    pub explicit_miss: bool,
    /// Expiration instant in RFC 3339 form
    pub expires_at: Option<DateTime<Utc>>,
    /// Whole seconds left before expiration
    pub ttl_remaining_secs: Option<i64>,
    /// The value, if the entry is a hit
    pub value: Option<&'a V>,
}
