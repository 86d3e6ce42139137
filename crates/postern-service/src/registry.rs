//! Registration lookup in the authorization agent's registry.

use crate::error::ServiceError;
use postern_core::Iri;
use postern_data::{EntityFactory, EntityKind, Registration};
use std::sync::Arc;

/// Finds registrations in the authorization agent's own registry.
///
/// The registry document lists its registrations; each candidate is built
/// through the shared factory, so repeated lookups ride the same cache as
/// every other resolution.
pub struct RegistryService {
    factory: Arc<EntityFactory>,
    registry_set: Iri,
}

impl RegistryService {
    /// Create a registry service over the agent's registry document.
    pub fn new(factory: Arc<EntityFactory>, registry_set: Iri) -> Self {
        Self {
            factory,
            registry_set,
        }
    }

    /// The registry document this service searches.
    pub fn registry_set(&self) -> &Iri {
        &self.registry_set
    }

    /// Find the registration whose registered agent is `web_id`.
    ///
    /// Absence is an error; the registry never auto-creates a registration
    /// on lookup. The returned registration is a live handle whose
    /// [`Registration::set_access_need_group`] patches the backing graph.
    pub async fn find_social_agent_registration(
        &self,
        web_id: &Iri,
    ) -> Result<Registration, ServiceError> {
        tracing::debug!(%web_id, registry = %self.registry_set, "searching agent registry");
        let registry = self
            .factory
            .build(&self.registry_set, EntityKind::AgentRegistry)
            .await?
            .into_agent_registry()?;

        for candidate in registry.registrations() {
            let registration = self
                .factory
                .build(candidate, EntityKind::Registration)
                .await?
                .into_registration()?;
            if registration.registered_agent() == web_id {
                tracing::debug!(%web_id, registration = %registration.iri(), "registration found");
                return Ok(registration);
            }
        }

        Err(ServiceError::registration_not_found(web_id))
    }
}
