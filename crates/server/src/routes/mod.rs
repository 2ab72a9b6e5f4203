//! Endpoint implementations.
//!
//! This module contains every HTTP endpoint exposed by the msgsearch server.

pub mod health;
pub mod index;
pub mod messages;
pub mod search;
