//! Access-request orchestration.
//!
//! The top-level workflow: given an application identifier and a social
//! agent's web identifier, read the application's declared access-need
//! group and bind it to the agent's registration. Strictly sequential;
//! every step hard-depends on the previous one, the single graph mutation
//! comes last, and a failure at any step leaves the registration untouched.

use crate::dispatch::{JobData, JobDispatch};
use crate::error::ServiceError;
use crate::registry::RegistryService;
use postern_core::Iri;
use postern_data::{EntityFactory, EntityKind, PermissionResolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// The acting session an access request runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    agent: Iri,
}

impl Session {
    /// Create a session for the given acting agent.
    pub fn new(agent: Iri) -> Self {
        Self { agent }
    }

    /// Web identifier of the acting agent.
    pub fn agent(&self) -> &Iri {
        &self.agent
    }
}

/// Orchestrates the access-request workflow.
pub struct AccessRequestService {
    factory: Arc<EntityFactory>,
    registry: Arc<RegistryService>,
    permissions: PermissionResolver,
    dispatch: Arc<dyn JobDispatch>,
}

impl AccessRequestService {
    /// Create the orchestrator over its shared collaborators.
    pub fn new(
        factory: Arc<EntityFactory>,
        registry: Arc<RegistryService>,
        permissions: PermissionResolver,
        dispatch: Arc<dyn JobDispatch>,
    ) -> Self {
        Self {
            factory,
            registry,
            permissions,
            dispatch,
        }
    }

    /// Bind `application`'s declared access-need group to the registration
    /// of the social agent identified by `web_id`.
    ///
    /// Steps, in order, each a hard dependency on the previous succeeding:
    ///
    /// 1. find the registration for `web_id`
    /// 2. build the application's client-identifier document
    /// 3. extract its access-need-group reference
    /// 4. gate on the session's right to modify the registration, then set
    ///    the group on it
    ///
    /// A reciprocal-registration job is enqueued afterwards, fire-and-forget:
    /// enqueue is awaited, completion is not, and an enqueue failure does not
    /// roll the registration back.
    pub async fn request_access_using_application_needs(
        &self,
        application: &Iri,
        web_id: &Iri,
        session: &Session,
    ) -> Result<(), ServiceError> {
        let request = Uuid::new_v4();
        tracing::info!(%request, %application, %web_id, "requesting access using application needs");

        let mut registration = self
            .registry
            .find_social_agent_registration(web_id)
            .await?;

        let profile = self
            .factory
            .build(application, EntityKind::ApplicationProfile)
            .await?
            .into_application_profile()?;
        let need_group = profile.access_need_group()?.clone();

        registration.flags = self
            .permissions
            .resolve_registration(&registration, session.agent())
            .await?;
        if !registration.flags.can_update.granted() {
            return Err(ServiceError::permission_denied(
                session.agent(),
                registration.iri(),
            ));
        }

        let client = self.factory.client();
        registration
            .set_access_need_group(client.as_ref(), need_group.clone())
            .await?;
        self.factory.reload(registration.iri()).await;
        tracing::info!(%request, registration = %registration.iri(), %need_group, "access need group bound");

        let job = JobData::ReciprocalRegistration {
            registered_agent: web_id.clone(),
        };
        self.dispatch.add(job, None).await.map_err(|error| {
            tracing::warn!(
                %request,
                registration = %registration.iri(),
                %error,
                "follow-up job enqueue failed; registration update stands"
            );
            ServiceError::dispatch_failed(error.reason)
        })?;

        Ok(())
    }
}
