//! Postern Service - Authorization Agent Workflows
//!
//! The workflow layer over `postern-data`'s typed resolution:
//!
//! - [`RegistryService`] - finds the registration binding a social agent to
//!   the authorization agent's registry
//! - [`AccessRequestService`] - the top-level protocol that links an
//!   application's declared access needs to a social agent's registration
//! - [`JobDispatch`] - the port through which asynchronous follow-up work
//!   is handed to a queue transport, with a closed set of typed payloads
//! - [`AuthorizationAgent`] - the composition root; collaborators are
//!   constructed once and injected explicitly, never reached through a
//!   global accessor
//!
//! Workflows are linear and fail-fast: each step hard-depends on the one
//! before it, and the single mutation comes last, so a failed call leaves
//! no partial state behind.

pub mod access_request;
pub mod agent;
pub mod dispatch;
pub mod error;
pub mod registry;

pub use access_request::{AccessRequestService, Session};
pub use agent::{AgentConfig, AuthorizationAgent};
pub use dispatch::{DispatchError, JobData, JobDispatch, JobOptions};
pub use error::ServiceError;
pub use registry::RegistryService;
