//! Capability flag derivation from access-grant statements.
//!
//! A grant is a subject carrying `acl:agent`, `acl:accessTo`, and `acl:mode`
//! statements. Flags are derived by collecting the modes of every grant that
//! names the acting agent and targets the entity - either in the entity's
//! own document or, when nothing applies there, in the document of the
//! container it belongs to (project for tasks and files, registration for
//! projects). Resolution is read-only.

use crate::entity::{EntityKind, FileInstance, Project, Registration, Task};
use crate::error::ResolveError;
use crate::factory::EntityFactory;
use postern_core::{vocab, GraphDocument, Iri};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Resolution state of one capability flag.
///
/// `Unresolved` is distinct from `Denied`: a flag nobody has derived yet is
/// unknown, not refused. After a resolver pass every applicable flag is
/// either `Granted` or `Denied`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    /// No resolution has been attempted
    #[default]
    Unresolved,
    /// Resolution ran and found no applicable grant
    Denied,
    /// Resolution ran and found an applicable grant
    Granted,
}

impl Flag {
    /// Whether the flag has been resolved to `Granted`.
    pub fn granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Whether resolution has been attempted at all.
    pub fn resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    fn from_granted(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

/// Access modes a grant statement can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Create sibling or child resources
    Create,
    /// Read the resource
    Read,
    /// Update the resource
    Update,
    /// Delete the resource
    Delete,
}

impl AccessMode {
    /// Map a mode IRI to its access mode, if the vocabulary knows it.
    pub fn from_iri(iri: &Iri) -> Option<Self> {
        match iri.as_str() {
            vocab::acl::CREATE => Some(Self::Create),
            vocab::acl::READ => Some(Self::Read),
            vocab::acl::UPDATE => Some(Self::Update),
            vocab::acl::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    /// The mode's vocabulary IRI.
    pub fn iri(self) -> Iri {
        Iri::from_static(match self {
            Self::Create => vocab::acl::CREATE,
            Self::Read => vocab::acl::READ,
            Self::Update => vocab::acl::UPDATE,
            Self::Delete => vocab::acl::DELETE,
        })
    }
}

/// Capability flags applicable to a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFlags {
    /// May the acting session create sibling registrations
    pub can_create: Flag,
    /// May the acting session modify this registration
    pub can_update: Flag,
}

/// Capability flags applicable to a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFlags {
    /// May the acting session modify the project
    pub can_update: Flag,
    /// May the acting session add tasks
    pub can_add_tasks: Flag,
    /// May the acting session add images
    pub can_add_images: Flag,
    /// May the acting session add files
    pub can_add_files: Flag,
}

/// Capability flags applicable to a task, file, or image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceFlags {
    /// May the acting session modify the instance
    pub can_update: Flag,
    /// May the acting session delete the instance
    pub can_delete: Flag,
}

/// Derives capability flags for an entity with respect to an acting agent.
///
/// Holds a factory so grants reachable through an entity's container can be
/// consulted; all reads go through the same cache as every other
/// resolution.
pub struct PermissionResolver {
    factory: Arc<EntityFactory>,
}

impl PermissionResolver {
    /// Create a resolver over the shared factory.
    pub fn new(factory: Arc<EntityFactory>) -> Self {
        Self { factory }
    }

    /// Flags for a registration with respect to `agent`.
    pub async fn resolve_registration(
        &self,
        registration: &Registration,
        agent: &Iri,
    ) -> Result<RegistrationFlags, ResolveError> {
        let modes = grant_modes(registration.document(), registration.iri(), agent);
        Ok(RegistrationFlags {
            can_create: Flag::from_granted(modes.contains(&AccessMode::Create)),
            can_update: Flag::from_granted(modes.contains(&AccessMode::Update)),
        })
    }

    /// Flags for a project with respect to `agent`.
    ///
    /// Grants may live on the project itself or on the registration it
    /// belongs to.
    pub async fn resolve_project(
        &self,
        project: &Project,
        agent: &Iri,
    ) -> Result<ProjectFlags, ResolveError> {
        let mut modes = grant_modes(project.document(), project.iri(), agent);
        if modes.is_empty() {
            let registration = self
                .factory
                .build(project.registration(), EntityKind::Registration)
                .await?
                .into_registration()?;
            modes = container_modes(registration.document(), project.iri(), registration.iri(), agent);
        }
        Ok(ProjectFlags {
            can_update: Flag::from_granted(modes.contains(&AccessMode::Update)),
            can_add_tasks: Flag::from_granted(modes.contains(&AccessMode::Create)),
            can_add_images: Flag::from_granted(modes.contains(&AccessMode::Create)),
            can_add_files: Flag::from_granted(modes.contains(&AccessMode::Create)),
        })
    }

    /// Flags for a task with respect to `agent`.
    pub async fn resolve_task(
        &self,
        task: &Task,
        agent: &Iri,
    ) -> Result<InstanceFlags, ResolveError> {
        let modes = self
            .instance_modes(task.document(), task.iri(), task.project(), agent)
            .await?;
        Ok(instance_flags(&modes))
    }

    /// Flags for a file or image instance with respect to `agent`.
    pub async fn resolve_file_instance(
        &self,
        file: &FileInstance,
        agent: &Iri,
    ) -> Result<InstanceFlags, ResolveError> {
        let modes = self
            .instance_modes(file.document(), file.iri(), file.project(), agent)
            .await?;
        Ok(instance_flags(&modes))
    }

    async fn instance_modes(
        &self,
        document: &GraphDocument,
        target: &Iri,
        project: &Iri,
        agent: &Iri,
    ) -> Result<BTreeSet<AccessMode>, ResolveError> {
        let modes = grant_modes(document, target, agent);
        if !modes.is_empty() {
            return Ok(modes);
        }
        let project = self
            .factory
            .build(project, EntityKind::Project)
            .await?
            .into_project()?;
        Ok(container_modes(
            project.document(),
            target,
            project.iri(),
            agent,
        ))
    }
}

fn instance_flags(modes: &BTreeSet<AccessMode>) -> InstanceFlags {
    InstanceFlags {
        can_update: Flag::from_granted(modes.contains(&AccessMode::Update)),
        can_delete: Flag::from_granted(modes.contains(&AccessMode::Delete)),
    }
}

/// Modes granted to `agent` on `target` by grants in `document`.
fn grant_modes(document: &GraphDocument, target: &Iri, agent: &Iri) -> BTreeSet<AccessMode> {
    let mut modes = BTreeSet::new();
    for triple in document.triples() {
        if triple.predicate.as_str() != vocab::acl::ACCESS_TO {
            continue;
        }
        let Some(granted_target) = triple.object.as_iri() else {
            continue;
        };
        if granted_target != target {
            continue;
        }
        let grant = &triple.subject;
        let names_agent = document
            .objects(grant, vocab::acl::AGENT)
            .any(|term| term.as_iri() == Some(agent));
        if !names_agent {
            continue;
        }
        for mode in document.objects(grant, vocab::acl::MODE) {
            if let Some(mode) = mode.as_iri().and_then(AccessMode::from_iri) {
                modes.insert(mode);
            }
        }
    }
    modes
}

/// Grant lookup in a container document: statements targeting the entity
/// itself win; grants on the container apply to everything inside it.
fn container_modes(
    document: &GraphDocument,
    target: &Iri,
    container: &Iri,
    agent: &Iri,
) -> BTreeSet<AccessMode> {
    let direct = grant_modes(document, target, agent);
    if direct.is_empty() {
        grant_modes(document, container, agent)
    } else {
        direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(value: &str) -> Iri {
        Iri::parse(value).unwrap()
    }

    fn grant(
        document: &mut GraphDocument,
        grant_iri: &Iri,
        agent: &Iri,
        target: &Iri,
        modes: &[AccessMode],
    ) {
        document.insert(
            grant_iri.clone(),
            Iri::from_static(vocab::rdf::TYPE),
            Iri::from_static(vocab::acl::AUTHORIZATION),
        );
        document.insert(
            grant_iri.clone(),
            Iri::from_static(vocab::acl::AGENT),
            agent.clone(),
        );
        document.insert(
            grant_iri.clone(),
            Iri::from_static(vocab::acl::ACCESS_TO),
            target.clone(),
        );
        for mode in modes {
            document.insert(
                grant_iri.clone(),
                Iri::from_static(vocab::acl::MODE),
                mode.iri(),
            );
        }
    }

    #[test]
    fn collects_modes_for_matching_agent_and_target() {
        let subject = iri("https://alice.example/projects/garden");
        let alice = iri("https://alice.example/#id");
        let mut document = GraphDocument::new(subject.clone());
        grant(
            &mut document,
            &iri("https://alice.example/projects/garden#grant-1"),
            &alice,
            &subject,
            &[AccessMode::Read, AccessMode::Update],
        );

        let modes = grant_modes(&document, &subject, &alice);
        assert_eq!(
            modes.into_iter().collect::<Vec<_>>(),
            vec![AccessMode::Read, AccessMode::Update]
        );
    }

    #[test]
    fn ignores_grants_naming_other_agents() {
        let subject = iri("https://alice.example/projects/garden");
        let alice = iri("https://alice.example/#id");
        let bob = iri("https://bob.example/#id");
        let mut document = GraphDocument::new(subject.clone());
        grant(
            &mut document,
            &iri("https://alice.example/projects/garden#grant-1"),
            &bob,
            &subject,
            &[AccessMode::Update],
        );

        assert!(grant_modes(&document, &subject, &alice).is_empty());
    }

    #[test]
    fn ignores_grants_targeting_other_resources() {
        let subject = iri("https://alice.example/projects/garden");
        let other = iri("https://alice.example/projects/kitchen");
        let alice = iri("https://alice.example/#id");
        let mut document = GraphDocument::new(subject.clone());
        grant(
            &mut document,
            &iri("https://alice.example/projects/garden#grant-1"),
            &alice,
            &other,
            &[AccessMode::Update],
        );

        assert!(grant_modes(&document, &subject, &alice).is_empty());
    }

    #[test]
    fn direct_grants_shadow_container_grants() {
        let container = iri("https://auth.alice.example/registrations/projectron");
        let target = iri("https://alice.example/projects/garden");
        let alice = iri("https://alice.example/#id");
        let mut document = GraphDocument::new(container.clone());
        grant(
            &mut document,
            &iri("https://auth.alice.example/registrations/projectron#grant-1"),
            &alice,
            &container,
            &[AccessMode::Create, AccessMode::Update, AccessMode::Delete],
        );
        grant(
            &mut document,
            &iri("https://auth.alice.example/registrations/projectron#grant-2"),
            &alice,
            &target,
            &[AccessMode::Read],
        );

        let modes = container_modes(&document, &target, &container, &alice);
        assert_eq!(modes.into_iter().collect::<Vec<_>>(), vec![AccessMode::Read]);
    }

    #[test]
    fn flag_default_is_unresolved() {
        assert_eq!(Flag::default(), Flag::Unresolved);
        assert!(!Flag::Unresolved.resolved());
        assert!(!Flag::Denied.granted());
        assert!(Flag::Granted.granted());
    }
}
