//! Postern Testing Infrastructure
//!
//! Explicit fakes for the two capability seams ([`RecordingGraphClient`]
//! for `postern_data::GraphClient`, [`RecordingDispatch`] for
//! `postern_service::JobDispatch`) plus builders for the graph documents
//! the entities are resolved from.
//!
//! The fakes are real implementations of the capability contracts,
//! constructed per test; call recording is an auxiliary concern layered on
//! top, not the abstraction itself.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! postern-testkit = { workspace = true }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod client;
pub mod dispatch;
pub mod documents;

pub use client::RecordingGraphClient;
pub use dispatch::RecordingDispatch;
pub use documents::*;
