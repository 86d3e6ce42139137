//! Graph-level error types.

use thiserror::Error;

/// Errors from identifier parsing and typed field extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The value is not a syntactically valid IRI.
    #[error("invalid IRI `{value}`: {reason}")]
    InvalidIri {
        /// The rejected value
        value: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A subject lacks a predicate the requested shape requires.
    #[error("subject {subject} is missing required predicate {predicate}")]
    MissingField {
        /// Subject the field was expected on
        subject: String,
        /// The absent predicate
        predicate: String,
    },

    /// A predicate holds a term of the wrong kind (IRI where a literal was
    /// expected, or the reverse).
    #[error("subject {subject} has a {found} at {predicate} where a {expected} was expected")]
    WrongTermKind {
        /// Subject carrying the statement
        subject: String,
        /// The predicate in question
        predicate: String,
        /// Term kind that was expected
        expected: &'static str,
        /// Term kind that was found
        found: &'static str,
    },
}

impl GraphError {
    /// Create an invalid IRI error.
    pub fn invalid_iri(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIri {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(subject: impl Into<String>, predicate: impl Into<String>) -> Self {
        Self::MissingField {
            subject: subject.into(),
            predicate: predicate.into(),
        }
    }
}
