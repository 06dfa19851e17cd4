//! Serializable models for cache items
//!
//! Views used to log or print an entry's state.

pub mod snapshot;

pub use snapshot::EntrySnapshot;
