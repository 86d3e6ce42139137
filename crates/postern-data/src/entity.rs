//! Typed entity views over graph documents.
//!
//! Each view is built from one parsed [`GraphDocument`] and either fully
//! populates or fails; no caller ever observes a half-fetched entity.
//! Construction goes through [`crate::EntityFactory`] - the constructors
//! here are crate-private so an entity always originates from a resolved
//! document.

use crate::client::GraphClient;
use crate::error::ResolveError;
use crate::permissions::{InstanceFlags, ProjectFlags, RegistrationFlags};
use postern_core::{vocab, GraphDocument, GraphError, Iri, Term};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of typed entity an identifier can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Receipt proving a grant occurred
    AccessReceipt,
    /// Social agent registration in the authorization agent's registry
    Registration,
    /// Work container
    Project,
    /// Task inside a project
    Task,
    /// Stored file inside a project
    FileInstance,
    /// Stored image; capability-compatible with [`EntityKind::FileInstance`]
    ImageInstance,
    /// Application client-identifier document
    ApplicationProfile,
    /// The authorization agent's registry of registrations
    AgentRegistry,
    /// A social agent. Agents are embedded views inside other documents and
    /// are never fetched standalone, so this kind has no factory mapping.
    Agent,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccessReceipt => "access-receipt",
            Self::Registration => "registration",
            Self::Project => "project",
            Self::Task => "task",
            Self::FileInstance => "file-instance",
            Self::ImageInstance => "image-instance",
            Self::ApplicationProfile => "application-profile",
            Self::AgentRegistry => "agent-registry",
            Self::Agent => "agent",
        };
        f.write_str(name)
    }
}

fn shape_error(iri: &Iri) -> impl FnOnce(GraphError) -> ResolveError + '_ {
    move |error| ResolveError::malformed(iri, error.to_string())
}

fn kind_mismatch(iri: &Iri, actual: EntityKind, expected: EntityKind) -> ResolveError {
    ResolveError::malformed(iri, format!("resolved as {actual}, expected {expected}"))
}

/// A social agent (person or organization) named in a graph.
///
/// Immutable once resolved. Agents are read out of the documents that
/// mention them rather than fetched in their own right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    iri: Iri,
    label: Option<String>,
}

impl Agent {
    /// Build an agent view from whatever `document` says about `iri`.
    pub fn from_graph(document: &GraphDocument, iri: Iri) -> Self {
        let label = document
            .literal_object(&iri, vocab::rdfs::LABEL)
            .map(str::to_owned);
        Self { iri, label }
    }

    /// The agent's web identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Display label, when the graph carries one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Registration binding a social agent to the authorization agent's
/// registry.
///
/// A live, mutable handle: [`Registration::set_access_need_group`] patches
/// the backing graph. Everything else is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    iri: Iri,
    label: String,
    registered_agent: Iri,
    access_need_group: Option<Iri>,
    /// Capability flags; `Unresolved` until permission resolution runs
    pub flags: RegistrationFlags,
    document: GraphDocument,
}

impl Registration {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        if !document.has_type(&iri, vocab::interop::SOCIAL_AGENT_REGISTRATION) {
            return Err(ResolveError::malformed(
                &iri,
                "not a social agent registration",
            ));
        }
        let label = document
            .required_literal(&iri, vocab::rdfs::LABEL)
            .map_err(shape_error(&iri))?
            .to_owned();
        let registered_agent = document
            .required_iri(&iri, vocab::interop::REGISTERED_AGENT)
            .map_err(shape_error(&iri))?
            .clone();
        let access_need_group = document
            .iri_object(&iri, vocab::interop::HAS_ACCESS_NEED_GROUP)
            .cloned();
        Ok(Self {
            iri,
            label,
            registered_agent,
            access_need_group,
            flags: RegistrationFlags::default(),
            document,
        })
    }

    /// The registration's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Web identifier of the social agent this registration binds.
    pub fn registered_agent(&self) -> &Iri {
        &self.registered_agent
    }

    /// View of the registered agent as described by this document.
    pub fn registered_agent_view(&self) -> Agent {
        Agent::from_graph(&self.document, self.registered_agent.clone())
    }

    /// The currently attached access-need group, if any.
    pub fn access_need_group(&self) -> Option<&Iri> {
        self.access_need_group.as_ref()
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    /// Attach or replace the access-need-group reference and push the
    /// patched document through `client`.
    ///
    /// Idempotent: setting the value already present issues the same
    /// replace and leaves the document observably unchanged. Not atomic
    /// against concurrent writers of the same registration; the backing
    /// store is last-writer-wins.
    pub async fn set_access_need_group(
        &mut self,
        client: &dyn GraphClient,
        need_group: Iri,
    ) -> Result<(), ResolveError> {
        tracing::debug!(registration = %self.iri, %need_group, "setting access need group");
        let subject = self.iri.clone();
        self.document.set_unique(
            &subject,
            Iri::from_static(vocab::interop::HAS_ACCESS_NEED_GROUP),
            need_group.clone(),
        );
        client
            .update(&self.iri.document(), &self.document)
            .await
            .map_err(|error| ResolveError::source(&self.iri, error.to_string()))?;
        self.access_need_group = Some(need_group);
        Ok(())
    }
}

/// A unit-of-work container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    iri: Iri,
    label: String,
    owner: Iri,
    registration: Iri,
    /// Capability flags; `Unresolved` until permission resolution runs
    pub flags: ProjectFlags,
    document: GraphDocument,
}

impl Project {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        if !document.has_type(&iri, vocab::pm::PROJECT) {
            return Err(ResolveError::malformed(&iri, "not a project"));
        }
        let label = document
            .required_literal(&iri, vocab::rdfs::LABEL)
            .map_err(shape_error(&iri))?
            .to_owned();
        let owner = document
            .required_iri(&iri, vocab::pm::OWNER)
            .map_err(shape_error(&iri))?
            .clone();
        let registration = document
            .required_iri(&iri, vocab::pm::IN_REGISTRATION)
            .map_err(shape_error(&iri))?
            .clone();
        Ok(Self {
            iri,
            label,
            owner,
            registration,
            flags: ProjectFlags::default(),
            document,
        })
    }

    /// The project's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Web identifier of the owning agent.
    pub fn owner(&self) -> &Iri {
        &self.owner
    }

    /// View of the owner as described by this document.
    pub fn owner_view(&self) -> Agent {
        Agent::from_graph(&self.document, self.owner.clone())
    }

    /// The registration this project belongs to.
    pub fn registration(&self) -> &Iri {
        &self.registration
    }

    /// Identifiers of the project's tasks.
    pub fn tasks(&self) -> Vec<Iri> {
        self.references(vocab::pm::HAS_TASK)
    }

    /// Identifiers of the project's images.
    pub fn images(&self) -> Vec<Iri> {
        self.references(vocab::pm::HAS_IMAGE)
    }

    /// Identifiers of the project's files.
    pub fn files(&self) -> Vec<Iri> {
        self.references(vocab::pm::HAS_FILE)
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    fn references(&self, predicate: &str) -> Vec<Iri> {
        self.document
            .objects(&self.iri, predicate)
            .filter_map(Term::as_iri)
            .cloned()
            .collect()
    }
}

/// A task inside a project, wrapping an opaque payload sourced from the
/// graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    iri: Iri,
    data: String,
    project: Iri,
    owner: Iri,
    /// Capability flags; `Unresolved` until permission resolution runs
    pub flags: InstanceFlags,
    document: GraphDocument,
}

impl Task {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        if !document.has_type(&iri, vocab::pm::TASK) {
            return Err(ResolveError::malformed(&iri, "not a task"));
        }
        let data = document
            .required_literal(&iri, vocab::pm::DATA)
            .map_err(shape_error(&iri))?
            .to_owned();
        let project = document
            .required_iri(&iri, vocab::pm::IN_PROJECT)
            .map_err(shape_error(&iri))?
            .clone();
        let owner = document
            .required_iri(&iri, vocab::pm::OWNER)
            .map_err(shape_error(&iri))?
            .clone();
        Ok(Self {
            iri,
            data,
            project,
            owner,
            flags: InstanceFlags::default(),
            document,
        })
    }

    /// The task's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// The opaque payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The owning project.
    pub fn project(&self) -> &Iri {
        &self.project
    }

    /// Web identifier of the owning agent.
    pub fn owner(&self) -> &Iri {
        &self.owner
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }
}

/// A stored file inside a project. Images are a capability-compatible
/// variant distinguished only by [`FileInstance::kind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInstance {
    iri: Iri,
    file_name: Option<String>,
    project: Iri,
    owner: Iri,
    kind: EntityKind,
    /// Capability flags; `Unresolved` until permission resolution runs
    pub flags: InstanceFlags,
    document: GraphDocument,
}

impl FileInstance {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        let kind = if document.has_type(&iri, vocab::pm::IMAGE) {
            EntityKind::ImageInstance
        } else if document.has_type(&iri, vocab::pm::FILE) {
            EntityKind::FileInstance
        } else {
            return Err(ResolveError::malformed(&iri, "not a file or image"));
        };
        let file_name = document
            .literal_object(&iri, vocab::pm::FILE_NAME)
            .map(str::to_owned);
        let project = document
            .required_iri(&iri, vocab::pm::IN_PROJECT)
            .map_err(shape_error(&iri))?
            .clone();
        let owner = document
            .required_iri(&iri, vocab::pm::OWNER)
            .map_err(shape_error(&iri))?
            .clone();
        Ok(Self {
            iri,
            file_name,
            project,
            owner,
            kind,
            flags: InstanceFlags::default(),
            document,
        })
    }

    /// The file's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Stored file name, when the graph carries one.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The owning project.
    pub fn project(&self) -> &Iri {
        &self.project
    }

    /// Web identifier of the owning agent.
    pub fn owner(&self) -> &Iri {
        &self.owner
    }

    /// Whether this instance is an image.
    pub fn is_image(&self) -> bool {
        self.kind == EntityKind::ImageInstance
    }

    /// The resolved kind: [`EntityKind::FileInstance`] or
    /// [`EntityKind::ImageInstance`].
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }
}

/// Receipt proving a grant occurred.
///
/// Built exclusively through asynchronous construction from an identifier;
/// there is no path that creates one with data already populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessReceipt {
    iri: Iri,
    provided_to: Iri,
    access_need_group: Option<Iri>,
    document: GraphDocument,
}

impl AccessReceipt {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        if !document.has_type(&iri, vocab::interop::ACCESS_RECEIPT) {
            return Err(ResolveError::malformed(&iri, "not an access receipt"));
        }
        let provided_to = document
            .required_iri(&iri, vocab::interop::PROVIDED_TO)
            .map_err(shape_error(&iri))?
            .clone();
        let access_need_group = document
            .iri_object(&iri, vocab::interop::HAS_ACCESS_NEED_GROUP)
            .cloned();
        Ok(Self {
            iri,
            provided_to,
            access_need_group,
            document,
        })
    }

    /// The receipt's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// The agent the grant was provided to.
    pub fn provided_to(&self) -> &Iri {
        &self.provided_to
    }

    /// The need group the grant answered, when recorded.
    pub fn access_need_group(&self) -> Option<&Iri> {
        self.access_need_group.as_ref()
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }
}

/// Typed view over an application's client-identifier document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationProfile {
    iri: Iri,
    label: String,
    access_need_group: Option<Iri>,
    document: GraphDocument,
}

impl ApplicationProfile {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        if !document.has_type(&iri, vocab::interop::APPLICATION) {
            return Err(ResolveError::malformed(&iri, "not an application"));
        }
        let label = document
            .required_literal(&iri, vocab::rdfs::LABEL)
            .map_err(shape_error(&iri))?
            .to_owned();
        let access_need_group = document
            .iri_object(&iri, vocab::interop::HAS_ACCESS_NEED_GROUP)
            .cloned();
        Ok(Self {
            iri,
            label,
            access_need_group,
            document,
        })
    }

    /// The application's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The access-need group this application declares.
    ///
    /// A client-identifier document that declares no needs cannot take part
    /// in an access request, so absence is a malformed graph at the point
    /// of use.
    pub fn access_need_group(&self) -> Result<&Iri, ResolveError> {
        self.access_need_group.as_ref().ok_or_else(|| {
            ResolveError::malformed(&self.iri, "client identifier declares no access need group")
        })
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }
}

/// The authorization agent's registry of agent registrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRegistry {
    iri: Iri,
    registrations: Vec<Iri>,
    document: GraphDocument,
}

impl AgentRegistry {
    pub(crate) fn from_document(iri: Iri, document: GraphDocument) -> Result<Self, ResolveError> {
        if !document.has_type(&iri, vocab::interop::AGENT_REGISTRY) {
            return Err(ResolveError::malformed(&iri, "not an agent registry"));
        }
        let registrations = document
            .objects(&iri, vocab::interop::HAS_AGENT_REGISTRATION)
            .filter_map(Term::as_iri)
            .cloned()
            .collect();
        Ok(Self {
            iri,
            registrations,
            document,
        })
    }

    /// The registry's identifier.
    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Identifiers of the registrations this registry lists.
    pub fn registrations(&self) -> &[Iri] {
        &self.registrations
    }

    /// The backing document.
    pub fn document(&self) -> &GraphDocument {
        &self.document
    }
}

/// A fully-built typed entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    /// Receipt proving a grant occurred
    AccessReceipt(AccessReceipt),
    /// Social agent registration
    Registration(Registration),
    /// Work container
    Project(Project),
    /// Task inside a project
    Task(Task),
    /// Stored file or image inside a project
    FileInstance(FileInstance),
    /// Application client-identifier document
    ApplicationProfile(ApplicationProfile),
    /// Registry of agent registrations
    AgentRegistry(AgentRegistry),
}

impl Entity {
    pub(crate) fn from_document(
        kind: EntityKind,
        iri: Iri,
        document: GraphDocument,
    ) -> Result<Self, ResolveError> {
        match kind {
            EntityKind::AccessReceipt => {
                AccessReceipt::from_document(iri, document).map(Self::AccessReceipt)
            }
            EntityKind::Registration => {
                Registration::from_document(iri, document).map(Self::Registration)
            }
            EntityKind::Project => Project::from_document(iri, document).map(Self::Project),
            EntityKind::Task => Task::from_document(iri, document).map(Self::Task),
            EntityKind::FileInstance | EntityKind::ImageInstance => {
                FileInstance::from_document(iri, document).map(Self::FileInstance)
            }
            EntityKind::ApplicationProfile => {
                ApplicationProfile::from_document(iri, document).map(Self::ApplicationProfile)
            }
            EntityKind::AgentRegistry => {
                AgentRegistry::from_document(iri, document).map(Self::AgentRegistry)
            }
            EntityKind::Agent => Err(ResolveError::UnsupportedKind { kind }),
        }
    }

    /// The entity's identifier.
    pub fn iri(&self) -> &Iri {
        match self {
            Self::AccessReceipt(receipt) => receipt.iri(),
            Self::Registration(registration) => registration.iri(),
            Self::Project(project) => project.iri(),
            Self::Task(task) => task.iri(),
            Self::FileInstance(file) => file.iri(),
            Self::ApplicationProfile(profile) => profile.iri(),
            Self::AgentRegistry(registry) => registry.iri(),
        }
    }

    /// The kind this entity resolved as.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::AccessReceipt(_) => EntityKind::AccessReceipt,
            Self::Registration(_) => EntityKind::Registration,
            Self::Project(_) => EntityKind::Project,
            Self::Task(_) => EntityKind::Task,
            Self::FileInstance(file) => file.kind(),
            Self::ApplicationProfile(_) => EntityKind::ApplicationProfile,
            Self::AgentRegistry(_) => EntityKind::AgentRegistry,
        }
    }

    /// Check this entity against the kind a caller asked for.
    ///
    /// An image satisfies a request for a file (capability-compatible
    /// variant); every other mismatch means the document's shape already
    /// proved to be something else.
    pub(crate) fn ensure_kind(self, requested: EntityKind) -> Result<Self, ResolveError> {
        let actual = self.kind();
        let compatible = actual == requested
            || (actual == EntityKind::ImageInstance && requested == EntityKind::FileInstance);
        if compatible {
            Ok(self)
        } else {
            Err(kind_mismatch(self.iri(), actual, requested))
        }
    }

    /// Unwrap as a registration.
    pub fn into_registration(self) -> Result<Registration, ResolveError> {
        match self {
            Self::Registration(registration) => Ok(registration),
            other => Err(kind_mismatch(
                other.iri(),
                other.kind(),
                EntityKind::Registration,
            )),
        }
    }

    /// Unwrap as a project.
    pub fn into_project(self) -> Result<Project, ResolveError> {
        match self {
            Self::Project(project) => Ok(project),
            other => Err(kind_mismatch(other.iri(), other.kind(), EntityKind::Project)),
        }
    }

    /// Unwrap as a task.
    pub fn into_task(self) -> Result<Task, ResolveError> {
        match self {
            Self::Task(task) => Ok(task),
            other => Err(kind_mismatch(other.iri(), other.kind(), EntityKind::Task)),
        }
    }

    /// Unwrap as a file or image instance.
    pub fn into_file_instance(self) -> Result<FileInstance, ResolveError> {
        match self {
            Self::FileInstance(file) => Ok(file),
            other => Err(kind_mismatch(
                other.iri(),
                other.kind(),
                EntityKind::FileInstance,
            )),
        }
    }

    /// Unwrap as an access receipt.
    pub fn into_access_receipt(self) -> Result<AccessReceipt, ResolveError> {
        match self {
            Self::AccessReceipt(receipt) => Ok(receipt),
            other => Err(kind_mismatch(
                other.iri(),
                other.kind(),
                EntityKind::AccessReceipt,
            )),
        }
    }

    /// Unwrap as an application profile.
    pub fn into_application_profile(self) -> Result<ApplicationProfile, ResolveError> {
        match self {
            Self::ApplicationProfile(profile) => Ok(profile),
            other => Err(kind_mismatch(
                other.iri(),
                other.kind(),
                EntityKind::ApplicationProfile,
            )),
        }
    }

    /// Unwrap as an agent registry.
    pub fn into_agent_registry(self) -> Result<AgentRegistry, ResolveError> {
        match self {
            Self::AgentRegistry(registry) => Ok(registry),
            other => Err(kind_mismatch(
                other.iri(),
                other.kind(),
                EntityKind::AgentRegistry,
            )),
        }
    }
}
