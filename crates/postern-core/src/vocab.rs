//! Vocabulary terms Postern reads and writes.
//!
//! Grouped by namespace. Predicates and classes are plain string constants;
//! wrap one with [`crate::Iri::from_static`] when a statement has to be
//! constructed rather than matched.

/// RDF core vocabulary.
pub mod rdf {
    /// Statement typing predicate.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDF Schema vocabulary.
pub mod rdfs {
    /// Human-readable display label.
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// Agent interoperability vocabulary: registries, registrations, and access
/// needs.
pub mod interop {
    /// Class of the authorization agent's registry document.
    pub const AGENT_REGISTRY: &str = "http://www.w3.org/ns/solid/interop#AgentRegistry";
    /// Class of a registration binding a social agent to a registry.
    pub const SOCIAL_AGENT_REGISTRATION: &str =
        "http://www.w3.org/ns/solid/interop#SocialAgentRegistration";
    /// Class of an application's client-identifier document.
    pub const APPLICATION: &str = "http://www.w3.org/ns/solid/interop#Application";
    /// Class of a receipt proving a grant occurred.
    pub const ACCESS_RECEIPT: &str = "http://www.w3.org/ns/solid/interop#AccessReceipt";

    /// Registry membership: registry -> registration.
    pub const HAS_AGENT_REGISTRATION: &str =
        "http://www.w3.org/ns/solid/interop#hasAgentRegistration";
    /// Registration ownership: registration -> social agent web identifier.
    pub const REGISTERED_AGENT: &str = "http://www.w3.org/ns/solid/interop#registeredAgent";
    /// Declared access needs: application or registration -> need group.
    pub const HAS_ACCESS_NEED_GROUP: &str =
        "http://www.w3.org/ns/solid/interop#hasAccessNeedGroup";
    /// Receipt beneficiary: receipt -> agent the grant was provided to.
    pub const PROVIDED_TO: &str = "http://www.w3.org/ns/solid/interop#providedTo";
}

/// Access-grant vocabulary.
pub mod acl {
    /// Class of a grant statement.
    pub const AUTHORIZATION: &str = "http://www.w3.org/ns/auth/acl#Authorization";
    /// Grant subject: which agent the grant names.
    pub const AGENT: &str = "http://www.w3.org/ns/auth/acl#agent";
    /// Grant target: which resource the grant applies to.
    pub const ACCESS_TO: &str = "http://www.w3.org/ns/auth/acl#accessTo";
    /// Grant mode: which kind of access is allowed.
    pub const MODE: &str = "http://www.w3.org/ns/auth/acl#mode";

    /// Create mode.
    pub const CREATE: &str = "http://www.w3.org/ns/auth/acl#Create";
    /// Read mode.
    pub const READ: &str = "http://www.w3.org/ns/auth/acl#Read";
    /// Update mode.
    pub const UPDATE: &str = "http://www.w3.org/ns/auth/acl#Update";
    /// Delete mode.
    pub const DELETE: &str = "http://www.w3.org/ns/auth/acl#Delete";
}

/// Project-management vocabulary for the work containers Postern mediates
/// access to.
pub mod pm {
    /// Class of a project container.
    pub const PROJECT: &str = "https://vocab.postern.dev/project-management#Project";
    /// Class of a task.
    pub const TASK: &str = "https://vocab.postern.dev/project-management#Task";
    /// Class of a stored file.
    pub const FILE: &str = "https://vocab.postern.dev/project-management#File";
    /// Class of a stored image.
    pub const IMAGE: &str = "https://vocab.postern.dev/project-management#Image";

    /// Entity ownership: entity -> owning agent.
    pub const OWNER: &str = "https://vocab.postern.dev/project-management#owner";
    /// Project membership: project -> registration it belongs to.
    pub const IN_REGISTRATION: &str =
        "https://vocab.postern.dev/project-management#inRegistration";
    /// Child membership: task or file -> owning project.
    pub const IN_PROJECT: &str = "https://vocab.postern.dev/project-management#inProject";
    /// Project children: project -> task.
    pub const HAS_TASK: &str = "https://vocab.postern.dev/project-management#hasTask";
    /// Project children: project -> image.
    pub const HAS_IMAGE: &str = "https://vocab.postern.dev/project-management#hasImage";
    /// Project children: project -> file.
    pub const HAS_FILE: &str = "https://vocab.postern.dev/project-management#hasFile";
    /// Opaque task payload.
    pub const DATA: &str = "https://vocab.postern.dev/project-management#data";
    /// Stored file name.
    pub const FILE_NAME: &str = "https://vocab.postern.dev/project-management#fileName";
}
