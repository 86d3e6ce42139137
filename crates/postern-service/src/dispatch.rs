//! Job dispatch port.
//!
//! The orchestrator hands asynchronous follow-up work to a queue transport
//! through this port. Only enqueueing is in scope; worker execution and the
//! queue itself are external collaborators. Payloads are a closed tagged
//! union so the boundary is checkable rather than an opaque bag of fields.

use async_trait::async_trait;
use postern_core::Iri;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload variants for asynchronous follow-up jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum JobData {
    /// Establish the reverse registration after an agent has been linked to
    /// an application's access needs.
    ReciprocalRegistration {
        /// Web identifier of the agent to register reciprocally
        registered_agent: Iri,
    },
    /// Deliver notice of a pending access request to an agent's inbox.
    AccessInboxDelivery {
        /// Web identifier of the agent to notify
        recipient: Iri,
        /// The need group the request concerns
        access_need_group: Iri,
    },
}

/// Scheduling options passed through to the queue transport verbatim.
///
/// The core interprets none of these fields; recognized meanings (delay,
/// priority, retry policy) belong to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOptions {
    /// Delay before the job becomes runnable, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    /// Queue priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Maximum delivery attempts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    /// Backoff between attempts, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_ms: Option<u64>,
}

/// Failure to enqueue a job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DispatchError {
    /// Diagnostic from the queue transport
    pub reason: String,
}

impl DispatchError {
    /// Create a dispatch error from a transport diagnostic.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Port to the job queue transport.
///
/// Enqueue is awaited; job completion never is. From the caller's
/// perspective dispatched work is fire-and-forget.
#[async_trait]
pub trait JobDispatch: Send + Sync {
    /// Enqueue a job, optionally with scheduling options.
    async fn add(&self, job: JobData, options: Option<JobOptions>) -> Result<(), DispatchError>;
}
