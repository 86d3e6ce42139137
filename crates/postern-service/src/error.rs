//! Workflow error types.

use postern_data::ResolveError;
use thiserror::Error;

/// Errors from authorization agent workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No registration exists for the given web identifier. The registry
    /// never auto-creates one; creation is a separate administrative flow.
    #[error("no registration found for {web_id}")]
    RegistrationNotFound {
        /// The web identifier that was searched for
        web_id: String,
    },

    /// The acting agent may not perform the attempted mutation. Raised by
    /// the pre-mutation gate; a denied capability flag is data, this is the
    /// refusal to proceed on it.
    #[error("agent {agent} may not modify {target}")]
    PermissionDenied {
        /// The acting agent
        agent: String,
        /// The resource the mutation targeted
        target: String,
    },

    /// Handing a follow-up job to the queue transport failed. The preceding
    /// mutation is not rolled back; the job can be replayed.
    #[error("job enqueue failed: {reason}")]
    DispatchFailed {
        /// Diagnostic from the dispatch port
        reason: String,
    },

    /// Entity resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ServiceError {
    /// Create a registration not found error.
    pub fn registration_not_found(web_id: impl ToString) -> Self {
        Self::RegistrationNotFound {
            web_id: web_id.to_string(),
        }
    }

    /// Create a permission denied error.
    pub fn permission_denied(agent: impl ToString, target: impl ToString) -> Self {
        Self::PermissionDenied {
            agent: agent.to_string(),
            target: target.to_string(),
        }
    }

    /// Create a dispatch failure error.
    pub fn dispatch_failed(reason: impl Into<String>) -> Self {
        Self::DispatchFailed {
            reason: reason.into(),
        }
    }
}
