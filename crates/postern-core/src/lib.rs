//! Postern Core - Linked-Data Foundation Types
//!
//! Leaf crate of the Postern workspace. It defines the identifier and graph
//! document model every other crate builds on:
//!
//! - [`Iri`] - validated identifier newtype used for every entity
//! - [`GraphDocument`], [`Triple`], [`Term`] - a parsed linked-data document
//!   with query and patch helpers
//! - [`vocab`] - predicate and class constants for the vocabularies Postern
//!   reads and writes
//!
//! This crate is deliberately synchronous and I/O-free. Fetching and updating
//! documents is a capability owned by `postern-data`; this crate only models
//! what a fetched document looks like once parsed.

pub mod error;
pub mod graph;
pub mod iri;
pub mod vocab;

pub use error::GraphError;
pub use graph::{GraphDocument, Term, Triple};
pub use iri::Iri;
