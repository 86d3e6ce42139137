//! Composition root for one authorization agent instance.

use crate::access_request::AccessRequestService;
use crate::dispatch::JobDispatch;
use crate::registry::RegistryService;
use postern_core::Iri;
use postern_data::{EntityFactory, GraphClient, PermissionResolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for one authorization agent instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Web identifier of the authorization agent itself
    pub agent: Iri,
    /// The agent's registry document
    pub registry_set: Iri,
}

/// One authorization agent: the composition root that wires the shared
/// collaborators together.
///
/// Construction is the only place collaborators are assembled; components
/// receive what they need explicitly and nothing reaches for a global
/// instance. One entity factory (and so one cache) serves all workflows of
/// the instance.
pub struct AuthorizationAgent {
    config: AgentConfig,
    factory: Arc<EntityFactory>,
    registry: Arc<RegistryService>,
    access_requests: AccessRequestService,
}

impl AuthorizationAgent {
    /// Assemble an agent from its configuration and external collaborators.
    pub fn new(
        config: AgentConfig,
        client: Arc<dyn GraphClient>,
        dispatch: Arc<dyn JobDispatch>,
    ) -> Self {
        let factory = Arc::new(EntityFactory::new(client));
        let registry = Arc::new(RegistryService::new(
            Arc::clone(&factory),
            config.registry_set.clone(),
        ));
        let permissions = PermissionResolver::new(Arc::clone(&factory));
        let access_requests = AccessRequestService::new(
            Arc::clone(&factory),
            Arc::clone(&registry),
            permissions,
            dispatch,
        );
        Self {
            config,
            factory,
            registry,
            access_requests,
        }
    }

    /// The agent's configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Web identifier of the authorization agent.
    pub fn iri(&self) -> &Iri {
        &self.config.agent
    }

    /// The shared entity factory.
    pub fn factory(&self) -> &Arc<EntityFactory> {
        &self.factory
    }

    /// The registry lookup service.
    pub fn registry(&self) -> &Arc<RegistryService> {
        &self.registry
    }

    /// The access-request orchestrator.
    pub fn access_requests(&self) -> &AccessRequestService {
        &self.access_requests
    }
}
