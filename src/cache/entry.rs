//! Cache Entry Module
//!
//! Defines the value object for a single cache item with lazy, memoized
//! validity.

use std::sync::OnceLock;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::expiry::{ExpiresAfter, ExpiresAt};
use crate::cache::ITEM_TYPE;
use crate::error::{CacheItemError, Result};
use crate::models::EntrySnapshot;

// == Cache Entry ==
/// A key, its value and the metadata deciding whether the value may be used.
///
/// Validity is decided once, on the first call to [`CacheEntry::is_hit`], and
/// never recomputed afterwards.
#[derive(Debug, Clone)]
pub struct CacheEntry<V, C = SystemClock> {
    key: String,
    value: V,
    /// Set at construction when the pool already knows the lookup failed
    explicit_miss: bool,
    /// Expiration instant, None = no expiration
    expires: Option<DateTime<Utc>>,
    /// Set when the expiration was applied without an instant
    expired_now: bool,
    /// Seconds applied when `expires_after` receives no value
    default_ttl: Option<u64>,
    hit: OnceLock<bool>,
    clock: C,
}

impl<V> CacheEntry<V, SystemClock> {
    // == Constructors ==
    /// Creates an entry that is a hit unless an expiration says otherwise.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self::with_clock(key, value, SystemClock)
    }

    /// Creates an entry that is permanently a miss.
    pub fn miss(key: impl Into<String>, value: V) -> Self {
        Self::miss_with_clock(key, value, SystemClock)
    }

    /// Creates an entry from the result of a pool lookup.
    ///
    /// Only `Some(false)` records a forced miss; `None` and `Some(true)` leave
    /// validity to the expiration.
    pub fn from_lookup(key: impl Into<String>, value: V, found: Option<bool>) -> Self {
        match found {
            Some(false) => Self::miss(key, value),
            _ => Self::new(key, value),
        }
    }
}

impl<V, C: Clock> CacheEntry<V, C> {
    /// Creates an entry that reads "now" from `clock`.
    pub fn with_clock(key: impl Into<String>, value: V, clock: C) -> Self {
        Self {
            key: key.into(),
            value,
            explicit_miss: false,
            expires: None,
            expired_now: false,
            default_ttl: None,
            hit: OnceLock::new(),
            clock,
        }
    }

    /// Creates a permanent miss that reads "now" from `clock`.
    pub fn miss_with_clock(key: impl Into<String>, value: V, clock: C) -> Self {
        Self {
            explicit_miss: true,
            ..Self::with_clock(key, value, clock)
        }
    }

    /// Sets the TTL used when `expires_after` receives no value.
    pub fn with_default_ttl(mut self, seconds: Option<u64>) -> Self {
        self.default_ttl = seconds;
        self
    }

    // == Accessors ==
    /// Returns the key for this item.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value if the item is a hit.
    pub fn get(&self) -> Option<&V> {
        if self.is_hit() {
            Some(&self.value)
        } else {
            None
        }
    }

    /// Consumes the entry, returning the value if the item is a hit.
    pub fn into_value(self) -> Option<V> {
        if self.is_hit() {
            Some(self.value)
        } else {
            None
        }
    }

    /// Returns the expiration instant, if one is set.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expires
    }

    /// Returns true if the entry was constructed as a miss.
    pub fn is_explicit_miss(&self) -> bool {
        self.explicit_miss
    }

    // == Time To Live ==
    /// Returns the time left until expiration, clamped at zero.
    ///
    /// Diagnostic only: this reads the clock every call and does not affect
    /// the memoized hit state.
    pub fn ttl_remaining(&self) -> Option<TimeDelta> {
        let now = self.clock.now();
        self.expires
            .map(|expires| (expires - now).max(TimeDelta::zero()))
    }

    // == Set ==
    /// Replaces the value. Hit state is untouched.
    pub fn set(&mut self, value: V) -> &mut Self {
        self.value = value;
        self
    }

    // == Is Hit ==
    /// Confirms whether this item holds a usable value.
    ///
    /// The answer is computed on the first call and memoized:
    /// - an explicit miss is never a hit
    /// - an expiration applied without an instant is never a hit
    /// - with an expiration, it is a hit iff the expiration is at or after now
    /// - without one, it is always a hit
    pub fn is_hit(&self) -> bool {
        *self.hit.get_or_init(|| {
            let hit = if self.explicit_miss || self.expired_now {
                false
            } else {
                match self.expires {
                    Some(expires) => expires >= self.clock.now(),
                    None => true,
                }
            };
            trace!(key = %self.key, hit, "Cache item validity memoized");
            hit
        })
    }

    // == Expires At ==
    /// Sets the instant after which the item is expired.
    ///
    /// No instant means the item expires now. Inputs of any other kind fail
    /// with [`CacheItemError::InvalidArgument`] and leave the entry unchanged.
    pub fn expires_at<E>(&mut self, expiration: E) -> Result<&mut Self>
    where
        E: TryInto<ExpiresAt>,
        CacheItemError: From<<E as TryInto<ExpiresAt>>::Error>,
    {
        let expiration = expiration
            .try_into()
            .map_err(CacheItemError::from)
            .inspect_err(|err| {
                debug!(key = %self.key, error = %err, "Cache item expiration rejected")
            })?;

        Ok(self.apply_expiration(expiration))
    }

    // == Expires After ==
    /// Sets the expiration relative to now.
    ///
    /// Integers are seconds; structured durations are added as is. No value
    /// uses the default TTL when one is configured and otherwise behaves like
    /// `expires_at` with no instant.
    pub fn expires_after<E>(&mut self, time: E) -> Result<&mut Self>
    where
        E: TryInto<ExpiresAfter>,
        CacheItemError: From<<E as TryInto<ExpiresAfter>>::Error>,
    {
        let time = time
            .try_into()
            .map_err(CacheItemError::from)
            .inspect_err(|err| {
                debug!(key = %self.key, error = %err, "Cache item expiration rejected")
            })?;

        let expiration = time.resolve(self.clock.now(), self.default_ttl);
        Ok(self.apply_expiration(expiration))
    }

    // == Snapshot ==
    /// Captures a serializable view of this entry. Evaluates `is_hit`.
    pub fn snapshot(&self) -> EntrySnapshot<'_, V> {
        EntrySnapshot {
            key: &self.key,
            item_type: ITEM_TYPE,
            hit: self.is_hit(),
            explicit_miss: self.explicit_miss,
            expires_at: self.expires,
            ttl_remaining_secs: self.ttl_remaining().map(|ttl| ttl.num_seconds()),
            value: self.get(),
        }
    }

    fn apply_expiration(&mut self, expiration: ExpiresAt) -> &mut Self {
        let instant = expiration.resolve(self.clock.now());
        self.expires = Some(instant);
        self.expired_now = expiration == ExpiresAt::Now;
        debug!(key = %self.key, expires_at = %instant, "Cache item expiration set");
        self
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn manual_entry(value: &str) -> (CacheEntry<String, ManualClock>, ManualClock) {
        let clock = ManualClock::starting_now();
        let entry = CacheEntry::with_clock("user:1", value.to_string(), clock.clone());
        (entry, clock)
    }

    #[test]
    fn test_entry_creation_no_expiration() {
        let entry = CacheEntry::new("user:1", "test_value".to_string());

        assert_eq!(entry.key(), "user:1");
        assert!(entry.expiration().is_none());
        assert!(entry.is_hit());
        assert_eq!(entry.get().map(String::as_str), Some("test_value"));
    }

    #[test]
    fn test_explicit_miss_ignores_expiration() {
        let mut entry = CacheEntry::miss("user:1", 7);
        entry.expires_after(3600).unwrap();

        assert!(entry.is_explicit_miss());
        assert!(!entry.is_hit());
        assert_eq!(entry.get(), None);
    }

    #[test]
    fn test_from_lookup() {
        assert!(!CacheEntry::from_lookup("k", 1, Some(false)).is_hit());
        assert!(CacheEntry::from_lookup("k", 1, Some(true)).is_hit());
        assert!(CacheEntry::from_lookup("k", 1, None).is_hit());
    }

    #[test]
    fn test_future_expires_at_is_hit() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_at(clock.now() + TimeDelta::minutes(5)).unwrap();

        assert!(entry.is_hit());
        assert_eq!(entry.get().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_past_expires_at_is_miss() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_at(clock.now() - TimeDelta::seconds(1)).unwrap();

        assert!(!entry.is_hit());
        assert_eq!(entry.get(), None);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        // Expiring exactly at the observed instant still counts as a hit
        let (mut entry, clock) = manual_entry("a");
        entry.expires_at(clock.now()).unwrap();

        assert!(entry.is_hit());
    }

    #[test]
    fn test_expires_at_none_means_now() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_at(None::<DateTime<Utc>>).unwrap();

        assert_eq!(entry.expiration(), Some(clock.now()));
        assert!(!entry.is_hit());
        assert_eq!(entry.get(), None);
    }

    #[test]
    fn test_expires_after_none_without_default_ttl_is_miss() {
        let (mut entry, _clock) = manual_entry("a");
        entry.expires_after(None::<i64>).unwrap();

        assert!(!entry.is_hit());
    }

    #[test]
    fn test_concrete_instant_replaces_expire_now() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_at(None::<DateTime<Utc>>).unwrap();
        entry.expires_at(clock.now() + TimeDelta::minutes(1)).unwrap();

        assert!(entry.is_hit());
    }

    #[test]
    fn test_expires_after_matches_expires_at() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_after(90).unwrap();

        assert_eq!(
            entry.expiration(),
            Some(clock.now() + TimeDelta::seconds(90))
        );
    }

    #[test]
    fn test_expires_after_uses_default_ttl() {
        let (entry, clock) = manual_entry("a");
        let mut entry = entry.with_default_ttl(Some(30));
        entry.expires_after(None::<i64>).unwrap();

        assert_eq!(
            entry.expiration(),
            Some(clock.now() + TimeDelta::seconds(30))
        );
    }

    #[test]
    fn test_validity_is_memoized() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_after(10).unwrap();
        assert!(entry.is_hit());

        clock.advance(TimeDelta::seconds(60));

        assert!(entry.is_hit());
        assert_eq!(entry.get().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_expiration_after_first_check_is_ignored() {
        let (mut entry, _clock) = manual_entry("a");
        assert!(entry.is_hit());

        entry.expires_after(-60).unwrap();

        assert!(entry.is_hit());
    }

    #[test]
    fn test_set_replaces_value_and_chains() {
        let (mut entry, _clock) = manual_entry("a");
        entry.set("b".to_string()).expires_after(60).unwrap();

        assert_eq!(entry.get().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_invalid_argument_leaves_expiration_unchanged() {
        let (mut entry, clock) = manual_entry("a");
        entry.expires_after(60).unwrap();
        let before = entry.expiration();

        clock.advance(TimeDelta::seconds(5));
        let result = entry.expires_after(&json!(1.5));
        assert!(matches!(result, Err(CacheItemError::InvalidArgument(_))));

        let result = entry.expires_at(json!("next week"));
        assert!(matches!(result, Err(CacheItemError::InvalidArgument(_))));

        assert_eq!(entry.expiration(), before);
    }

    #[test]
    fn test_ttl_remaining() {
        let (mut entry, clock) = manual_entry("a");
        assert!(entry.ttl_remaining().is_none());

        entry.expires_after(10).unwrap();
        assert_eq!(entry.ttl_remaining(), Some(TimeDelta::seconds(10)));

        clock.advance(TimeDelta::seconds(15));
        assert_eq!(entry.ttl_remaining(), Some(TimeDelta::zero()));
    }

    #[test]
    fn test_into_value() {
        assert_eq!(CacheEntry::new("k", 3).into_value(), Some(3));
        assert_eq!(CacheEntry::miss("k", 3).into_value(), None);
    }

    #[test]
    fn test_memoization_is_shared_across_threads() {
        let (mut entry, _clock) = manual_entry("a");
        entry.expires_after(60).unwrap();
        let entry = &entry;

        let results: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || entry.is_hit()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert!(results.iter().all(|hit| *hit));
    }
}
