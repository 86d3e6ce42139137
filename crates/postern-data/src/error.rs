//! Entity resolution error types.

use crate::entity::EntityKind;
use thiserror::Error;

/// Errors from resolving an identifier to a typed entity.
///
/// `Clone` is load-bearing: a single-flight fetch shares one failure among
/// every coalesced caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The identifier resolves to no document. Local to the one build call;
    /// never retried automatically.
    #[error("no document found at {iri}")]
    NotFound {
        /// The identifier that resolved to nothing
        iri: String,
    },

    /// A document exists but lacks required fields or has the wrong shape
    /// for the requested kind. Permanent: refetching an unchanged document
    /// yields the same failure.
    #[error("document at {iri} is malformed: {reason}")]
    MalformedGraph {
        /// The document's identifier
        iri: String,
        /// What was wrong with its shape
        reason: String,
    },

    /// The requested entity kind has no factory mapping. Programmer error,
    /// surfaced immediately.
    #[error("no entity mapping for kind {kind}")]
    UnsupportedKind {
        /// The unmapped kind
        kind: EntityKind,
    },

    /// The underlying graph source reported a failure. Retry policy, if any,
    /// lives in the source, not here.
    #[error("graph source failed for {iri}: {reason}")]
    Source {
        /// The identifier being fetched or updated
        iri: String,
        /// Diagnostic reported by the source
        reason: String,
    },
}

impl ResolveError {
    /// Create a not found error.
    pub fn not_found(iri: impl ToString) -> Self {
        Self::NotFound {
            iri: iri.to_string(),
        }
    }

    /// Create a malformed graph error.
    pub fn malformed(iri: impl ToString, reason: impl Into<String>) -> Self {
        Self::MalformedGraph {
            iri: iri.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a source failure error.
    pub fn source(iri: impl ToString, reason: impl Into<String>) -> Self {
        Self::Source {
            iri: iri.to_string(),
            reason: reason.into(),
        }
    }
}
