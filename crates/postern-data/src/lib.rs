//! Postern Data - Typed Entity Resolution
//!
//! Turns remote, loosely-typed graph documents into strongly-typed,
//! permission-aware entities:
//!
//! - [`GraphClient`] - the capability seam to whatever fetches and updates
//!   linked-data documents; transport, serialization, and retry live behind
//!   it
//! - [`Entity`] and its typed views ([`Registration`], [`Project`],
//!   [`Task`], [`FileInstance`], [`AccessReceipt`], [`ApplicationProfile`],
//!   [`AgentRegistry`]) - built from parsed documents, never exposed
//!   partially populated
//! - [`EntityFactory`] - resolves identifiers to entities with per-identifier
//!   memoization and single-flight coalescing of concurrent fetches
//! - [`PermissionResolver`] - derives three-state capability flags from
//!   access-grant statements
//!
//! # Fetch discipline
//!
//! A document is fetched at most once per identifier for the lifetime of a
//! factory. Concurrent builds of the same identifier share one in-flight
//! fetch; a failed fetch is shared with every coalesced caller and then
//! forgotten, so a later call may retry. Nothing enters the cache until an
//! entity is fully built.

pub mod client;
pub mod entity;
pub mod error;
pub mod factory;
pub mod permissions;

pub use client::{ClientError, GraphClient};
pub use entity::{
    AccessReceipt, Agent, AgentRegistry, ApplicationProfile, Entity, EntityKind, FileInstance,
    Project, Registration, Task,
};
pub use error::ResolveError;
pub use factory::EntityFactory;
pub use permissions::{
    AccessMode, Flag, InstanceFlags, PermissionResolver, ProjectFlags, RegistrationFlags,
};
