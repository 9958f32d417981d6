//! Cached list queries and mutations against the marketplace REST API.
//!
//! Everything below `hooks` is free of Leptos and runs under plain
//! `#[tokio::test]` with an in-memory transport.

pub mod cache;
pub mod client;
pub mod error;
pub mod hooks;
pub mod list_state;
pub mod roles;
pub mod tracker;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ListPage, MutationOp, QueryClient, Resource};
pub use error::ApiError;
