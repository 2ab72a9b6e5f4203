//! In-process snapshot cache for upstream messages.
//!
//! The cache holds at most one [`Snapshot`] at a time. Writers build a complete
//! snapshot and swap it in behind a single `Arc`, so readers always observe either
//! the previous or the new message set, never a partially written one.
//!
//! - Freshness is purely time based (`now < expires_at`)
//! - Snapshots are capped at write time, keeping the first N messages
//! - "No snapshot yet" is an explicit state, distinct from an empty snapshot

pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::{CacheView, MessageCache};
