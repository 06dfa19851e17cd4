//! Cache Module
//!
//! Provides the cache item value object, its contract and expiration inputs.

mod clock;
mod contract;
mod entry;
mod expiry;
mod factory;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use contract::CacheItem;
pub use entry::CacheEntry;
pub use expiry::{ExpiresAfter, ExpiresAt};
pub use factory::EntryFactory;

// == Public Constants ==
/// Type tag reported by every cache item
pub const ITEM_TYPE: &str = "CACHE_ITEM";
