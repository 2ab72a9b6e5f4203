//! Client code for msgsearch.
//!
//! This crate provides the upstream message fetcher and the `MessageSource`
//! seam the server's refresher depends on.

pub mod source;
pub mod upstream;

pub use source::MessageSource;
pub use upstream::{FetchError, FetchErrorKind, FetchWindow, UpstreamClient, UpstreamConfig};
