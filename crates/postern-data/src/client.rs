//! Graph document source capability.

use async_trait::async_trait;
use postern_core::{GraphDocument, Iri};
use thiserror::Error;

/// Failure reported by a graph source. Opaque to the resolution core;
/// whatever transport sits behind the trait owns retries and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ClientError {
    /// Diagnostic from the transport
    pub reason: String,
}

impl ClientError {
    /// Create a client error from a transport diagnostic.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Capability to fetch and update linked-data documents by identifier.
///
/// Implementations own the wire format and the transport. The core only ever
/// sees parsed [`GraphDocument`] values, and only ever addresses whole
/// documents: fragment identifiers are stripped before a fetch reaches this
/// seam.
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Fetch the parsed document at `iri`, or `None` when nothing exists
    /// there.
    async fn fetch(&self, iri: &Iri) -> Result<Option<GraphDocument>, ClientError>;

    /// Replace the document at `iri`. Last-writer-wins; the core documents
    /// this rather than papering over it.
    async fn update(&self, iri: &Iri, document: &GraphDocument) -> Result<(), ClientError>;
}
