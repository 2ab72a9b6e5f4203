//! Core types and shared functionality for msgsearch.
//!
//! This crate provides:
//! - The `Message` record mirrored from the upstream API
//! - The in-process snapshot cache
//! - The query engine (filter, sort, paginate)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod message;
pub mod query;

pub use cache::{CacheView, MessageCache, Snapshot};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use message::Message;
pub use query::{ListParams, MessagePage, SearchPage, SearchParams};
