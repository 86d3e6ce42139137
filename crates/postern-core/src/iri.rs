//! IRI identifier type used across the Postern workspace.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Internationalized Resource Identifier.
///
/// Every entity Postern resolves is identified by a globally unique, stable
/// IRI. The wrapper validates syntax on construction, so holding an `Iri`
/// means holding an identifier a graph source can be asked about.
///
/// Subjects inside a document may carry a fragment (`…/registry#grant-1`);
/// [`Iri::document`] strips it to obtain the fetchable document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Parse and validate an IRI.
    pub fn parse(value: impl Into<String>) -> Result<Self, GraphError> {
        let value = value.into();
        match url::Url::parse(&value) {
            Ok(_) => Ok(Self(value)),
            Err(error) => Err(GraphError::invalid_iri(value, error.to_string())),
        }
    }

    /// Wrap a compile-time vocabulary term.
    ///
    /// Callers must only pass constants from [`crate::vocab`]; those are
    /// valid by construction and skipping the parser keeps vocabulary
    /// comparisons allocation-cheap.
    pub fn from_static(term: &'static str) -> Self {
        Self(term.to_owned())
    }

    /// The IRI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document this identifier lives in: the IRI with any fragment
    /// removed. An IRI without a fragment is its own document.
    pub fn document(&self) -> Iri {
        match self.0.split_once('#') {
            Some((document, _)) => Self(document.to_owned()),
            None => self.clone(),
        }
    }

    /// Whether this identifier addresses a subject inside a larger document.
    pub fn has_fragment(&self) -> bool {
        self.0.contains('#')
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Iri {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0
    }
}
