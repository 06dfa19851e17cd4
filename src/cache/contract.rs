//! Cache Item Contract
//!
//! The operations a cache pool relies on, so any storage backend can accept
//! and return conforming items.

use crate::cache::clock::Clock;
use crate::cache::entry::CacheEntry;
use crate::cache::expiry::{ExpiresAfter, ExpiresAt};
use crate::cache::ITEM_TYPE;
use crate::error::{CacheItemError, Result};

// == Cache Item Trait ==
/// A cache item exchanged between a pool and its callers.
pub trait CacheItem {
    /// The stored payload type.
    type Value;

    /// Returns the key for this item.
    fn key(&self) -> &str;

    /// Returns the value if the lookup resulted in a hit.
    fn get(&self) -> Option<&Self::Value>;

    /// Replaces the value.
    fn set(&mut self, value: Self::Value) -> &mut Self;

    /// Confirms whether the lookup resulted in a hit.
    fn is_hit(&self) -> bool;

    /// Sets the absolute expiration.
    fn expires_at<E>(&mut self, expiration: E) -> Result<&mut Self>
    where
        E: TryInto<ExpiresAt>,
        CacheItemError: From<<E as TryInto<ExpiresAt>>::Error>;

    /// Sets the expiration relative to now.
    fn expires_after<E>(&mut self, time: E) -> Result<&mut Self>
    where
        E: TryInto<ExpiresAfter>,
        CacheItemError: From<<E as TryInto<ExpiresAfter>>::Error>;

    /// Type tag used by pools for dispatch.
    fn item_type(&self) -> &'static str {
        ITEM_TYPE
    }
}

impl<V, C: Clock> CacheItem for CacheEntry<V, C> {
    type Value = V;

    fn key(&self) -> &str {
        CacheEntry::key(self)
    }

    fn get(&self) -> Option<&V> {
        CacheEntry::get(self)
    }

    fn set(&mut self, value: V) -> &mut Self {
        CacheEntry::set(self, value)
    }

    fn is_hit(&self) -> bool {
        CacheEntry::is_hit(self)
    }

    fn expires_at<E>(&mut self, expiration: E) -> Result<&mut Self>
    where
        E: TryInto<ExpiresAt>,
        CacheItemError: From<<E as TryInto<ExpiresAt>>::Error>,
    {
        CacheEntry::expires_at(self, expiration)
    }

    fn expires_after<E>(&mut self, time: E) -> Result<&mut Self>
    where
        E: TryInto<ExpiresAfter>,
        CacheItemError: From<<E as TryInto<ExpiresAfter>>::Error>,
    {
        CacheEntry::expires_after(self, time)
    }
}
