//! Builders for the graph documents entities are resolved from.

use postern_core::{vocab, GraphDocument, Iri, Term};
use postern_data::AccessMode;

/// Parse a known-good IRI, panicking on a typo in the test itself.
pub fn iri(value: &str) -> Iri {
    Iri::parse(value).unwrap()
}

/// An agent registry listing the given registrations.
pub fn registry_document(subject: &Iri, registrations: &[Iri]) -> GraphDocument {
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::interop::AGENT_REGISTRY),
    );
    for registration in registrations {
        document.insert(
            subject.clone(),
            Iri::from_static(vocab::interop::HAS_AGENT_REGISTRATION),
            registration.clone(),
        );
    }
    document
}

/// A social agent registration owned by `registered_agent`.
pub fn registration_document(subject: &Iri, label: &str, registered_agent: &Iri) -> GraphDocument {
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::interop::SOCIAL_AGENT_REGISTRATION),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdfs::LABEL),
        Term::literal(label),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::interop::REGISTERED_AGENT),
        registered_agent.clone(),
    );
    document
}

/// An application client-identifier document, optionally declaring an
/// access-need group.
pub fn application_document(
    subject: &Iri,
    label: &str,
    access_need_group: Option<&Iri>,
) -> GraphDocument {
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::interop::APPLICATION),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdfs::LABEL),
        Term::literal(label),
    );
    if let Some(need_group) = access_need_group {
        document.insert(
            subject.clone(),
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            need_group.clone(),
        );
    }
    document
}

/// A project inside `registration`, owned by `owner`.
pub fn project_document(
    subject: &Iri,
    label: &str,
    owner: &Iri,
    registration: &Iri,
) -> GraphDocument {
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::pm::PROJECT),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdfs::LABEL),
        Term::literal(label),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::OWNER),
        owner.clone(),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::IN_REGISTRATION),
        registration.clone(),
    );
    document
}

/// A task inside `project` carrying an opaque payload.
pub fn task_document(subject: &Iri, data: &str, project: &Iri, owner: &Iri) -> GraphDocument {
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::pm::TASK),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::DATA),
        Term::literal(data),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::IN_PROJECT),
        project.clone(),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::OWNER),
        owner.clone(),
    );
    document
}

/// A file or image instance inside `project`.
pub fn file_document(
    subject: &Iri,
    file_name: Option<&str>,
    project: &Iri,
    owner: &Iri,
    image: bool,
) -> GraphDocument {
    let class = if image {
        vocab::pm::IMAGE
    } else {
        vocab::pm::FILE
    };
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(class),
    );
    if let Some(file_name) = file_name {
        document.insert(
            subject.clone(),
            Iri::from_static(vocab::pm::FILE_NAME),
            Term::literal(file_name),
        );
    }
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::IN_PROJECT),
        project.clone(),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::pm::OWNER),
        owner.clone(),
    );
    document
}

/// An access receipt provided to `provided_to`.
pub fn access_receipt_document(
    subject: &Iri,
    provided_to: &Iri,
    access_need_group: Option<&Iri>,
) -> GraphDocument {
    let mut document = GraphDocument::new(subject.clone());
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::interop::ACCESS_RECEIPT),
    );
    document.insert(
        subject.clone(),
        Iri::from_static(vocab::interop::PROVIDED_TO),
        provided_to.clone(),
    );
    if let Some(need_group) = access_need_group {
        document.insert(
            subject.clone(),
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            need_group.clone(),
        );
    }
    document
}

/// Attach an access grant to a document.
pub fn add_grant(
    document: &mut GraphDocument,
    grant: &Iri,
    agent: &Iri,
    target: &Iri,
    modes: &[AccessMode],
) {
    document.insert(
        grant.clone(),
        Iri::from_static(vocab::rdf::TYPE),
        Iri::from_static(vocab::acl::AUTHORIZATION),
    );
    document.insert(
        grant.clone(),
        Iri::from_static(vocab::acl::AGENT),
        agent.clone(),
    );
    document.insert(
        grant.clone(),
        Iri::from_static(vocab::acl::ACCESS_TO),
        target.clone(),
    );
    for mode in modes {
        document.insert(
            grant.clone(),
            Iri::from_static(vocab::acl::MODE),
            mode.iri(),
        );
    }
}
