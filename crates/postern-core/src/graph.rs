//! Parsed graph document model.
//!
//! Postern consumes linked-data documents that have already been parsed by
//! the transport collaborator; this module is the shape they arrive in. A
//! [`GraphDocument`] is a flat set of subject-predicate-object statements
//! plus the primary subject the document describes, with query helpers for
//! typed extraction and patch helpers for the narrow mutations the system
//! performs.

use crate::error::GraphError;
use crate::iri::Iri;
use serde::{Deserialize, Serialize};

/// Object position of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A reference to another resource.
    Iri(Iri),
    /// An opaque literal value.
    Literal(String),
}

impl Term {
    /// Create a literal term.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// The term as an IRI reference, if it is one.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }

    /// The term as a literal, if it is one.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Iri(_) => None,
            Self::Literal(value) => Some(value),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Iri(_) => "reference",
            Self::Literal(_) => "literal",
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

/// A single subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// Statement subject.
    pub subject: Iri,
    /// Statement predicate.
    pub predicate: Iri,
    /// Statement object.
    pub object: Term,
}

impl Triple {
    /// Create a statement.
    pub fn new(subject: Iri, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

/// One parsed linked-data document.
///
/// Carries the primary subject the document describes and every statement
/// the parser produced, including statements about secondary subjects
/// (grant nodes, embedded agent descriptions). Queries take the predicate
/// as a plain string so [`crate::vocab`] constants can be matched without
/// allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    subject: Iri,
    triples: Vec<Triple>,
}

impl GraphDocument {
    /// Create an empty document describing `subject`.
    pub fn new(subject: Iri) -> Self {
        Self {
            subject,
            triples: Vec::new(),
        }
    }

    /// Create a document from already-parsed statements.
    pub fn with_triples(subject: Iri, triples: Vec<Triple>) -> Self {
        Self { subject, triples }
    }

    /// The primary subject this document describes.
    pub fn primary_subject(&self) -> &Iri {
        &self.subject
    }

    /// All statements in the document.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Append a statement.
    pub fn insert(&mut self, subject: Iri, predicate: Iri, object: impl Into<Term>) {
        self.triples.push(Triple::new(subject, predicate, object));
    }

    /// All objects of statements matching `subject` and `predicate`.
    pub fn objects<'a, 'b>(
        &'a self,
        subject: &'b Iri,
        predicate: &'b str,
    ) -> impl Iterator<Item = &'a Term> + 'b
    where
        'a: 'b,
    {
        self.triples
            .iter()
            .filter(move |triple| {
                &triple.subject == subject && triple.predicate.as_str() == predicate
            })
            .map(|triple| &triple.object)
    }

    /// First object matching `subject` and `predicate`, if any.
    pub fn object(&self, subject: &Iri, predicate: &str) -> Option<&Term> {
        self.objects(subject, predicate).next()
    }

    /// First IRI object matching `subject` and `predicate`, if any.
    pub fn iri_object(&self, subject: &Iri, predicate: &str) -> Option<&Iri> {
        self.objects(subject, predicate)
            .find_map(|term| term.as_iri())
    }

    /// First literal object matching `subject` and `predicate`, if any.
    pub fn literal_object(&self, subject: &Iri, predicate: &str) -> Option<&str> {
        self.objects(subject, predicate)
            .find_map(|term| term.as_literal())
    }

    /// Required IRI object; absence or a literal in its place is an error.
    pub fn required_iri(&self, subject: &Iri, predicate: &str) -> Result<&Iri, GraphError> {
        match self.object(subject, predicate) {
            Some(Term::Iri(iri)) => Ok(iri),
            Some(term) => Err(GraphError::WrongTermKind {
                subject: subject.to_string(),
                predicate: predicate.to_owned(),
                expected: "reference",
                found: term.kind(),
            }),
            None => Err(GraphError::missing_field(subject.as_str(), predicate)),
        }
    }

    /// Required literal object; absence or a reference in its place is an
    /// error.
    pub fn required_literal(&self, subject: &Iri, predicate: &str) -> Result<&str, GraphError> {
        match self.object(subject, predicate) {
            Some(Term::Literal(value)) => Ok(value),
            Some(term) => Err(GraphError::WrongTermKind {
                subject: subject.to_string(),
                predicate: predicate.to_owned(),
                expected: "literal",
                found: term.kind(),
            }),
            None => Err(GraphError::missing_field(subject.as_str(), predicate)),
        }
    }

    /// Remove every statement matching `subject` and `predicate`.
    pub fn remove_matching(&mut self, subject: &Iri, predicate: &str) {
        self.triples
            .retain(|triple| &triple.subject != subject || triple.predicate.as_str() != predicate);
    }

    /// Replace the value of a single-valued predicate.
    ///
    /// Removes every existing statement for the pair and appends the new one,
    /// so setting the same value twice leaves the document observably equal
    /// to setting it once.
    pub fn set_unique(&mut self, subject: &Iri, predicate: Iri, object: impl Into<Term>) {
        self.remove_matching(subject, predicate.as_str());
        self.triples
            .push(Triple::new(subject.clone(), predicate, object));
    }

    /// Subjects declared to be of class `class`.
    pub fn subjects_of_type<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Iri> {
        self.triples
            .iter()
            .filter(move |triple| {
                triple.predicate.as_str() == crate::vocab::rdf::TYPE
                    && triple.object.as_iri().map(Iri::as_str) == Some(class)
            })
            .map(|triple| &triple.subject)
    }

    /// Whether `subject` is declared to be of class `class`.
    pub fn has_type(&self, subject: &Iri, class: &str) -> bool {
        self.objects(subject, crate::vocab::rdf::TYPE)
            .any(|term| term.as_iri().map(Iri::as_str) == Some(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;

    fn iri(value: &str) -> Iri {
        Iri::parse(value).unwrap()
    }

    fn labelled_document() -> GraphDocument {
        let subject = iri("https://alice.example/projects/garden");
        let mut document = GraphDocument::new(subject.clone());
        document.insert(
            subject.clone(),
            Iri::from_static(vocab::rdf::TYPE),
            Iri::from_static(vocab::pm::PROJECT),
        );
        document.insert(
            subject,
            Iri::from_static(vocab::rdfs::LABEL),
            Term::literal("Garden"),
        );
        document
    }

    #[test]
    fn object_queries_match_subject_and_predicate() {
        let document = labelled_document();
        let subject = document.primary_subject().clone();

        assert_eq!(
            document.literal_object(&subject, vocab::rdfs::LABEL),
            Some("Garden")
        );
        assert!(document.has_type(&subject, vocab::pm::PROJECT));
        assert_eq!(document.object(&subject, vocab::acl::MODE), None);
    }

    #[test]
    fn required_iri_reports_missing_field() {
        let document = labelled_document();
        let subject = document.primary_subject().clone();

        let error = document
            .required_iri(&subject, vocab::pm::OWNER)
            .unwrap_err();
        assert!(matches!(error, GraphError::MissingField { .. }));
    }

    #[test]
    fn required_iri_rejects_literal_terms() {
        let document = labelled_document();
        let subject = document.primary_subject().clone();

        let error = document
            .required_iri(&subject, vocab::rdfs::LABEL)
            .unwrap_err();
        assert!(matches!(error, GraphError::WrongTermKind { .. }));
    }

    #[test]
    fn set_unique_is_idempotent() {
        let mut document = labelled_document();
        let subject = document.primary_subject().clone();
        let group = iri("https://projectron.example/needs#group");

        document.set_unique(
            &subject,
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            group.clone(),
        );
        let once = document.clone();
        document.set_unique(
            &subject,
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            group.clone(),
        );

        assert_eq!(document, once);
        assert_eq!(
            document.iri_object(&subject, vocab::interop::HAS_ACCESS_NEED_GROUP),
            Some(&group)
        );
    }

    #[test]
    fn set_unique_replaces_previous_value() {
        let mut document = labelled_document();
        let subject = document.primary_subject().clone();

        document.set_unique(
            &subject,
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            iri("https://projectron.example/needs#old"),
        );
        document.set_unique(
            &subject,
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            iri("https://projectron.example/needs#new"),
        );

        let values: Vec<_> = document
            .objects(&subject, vocab::interop::HAS_ACCESS_NEED_GROUP)
            .collect();
        assert_eq!(
            values,
            vec![&Term::Iri(iri("https://projectron.example/needs#new"))]
        );
    }

    #[test]
    fn subjects_of_type_finds_secondary_subjects() {
        let mut document = labelled_document();
        let grant = iri("https://alice.example/projects/garden#grant-1");
        document.insert(
            grant.clone(),
            Iri::from_static(vocab::rdf::TYPE),
            Iri::from_static(vocab::acl::AUTHORIZATION),
        );

        let found: Vec<_> = document
            .subjects_of_type(vocab::acl::AUTHORIZATION)
            .collect();
        assert_eq!(found, vec![&grant]);
    }
}
