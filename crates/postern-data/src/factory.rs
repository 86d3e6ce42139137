//! Entity factory: identifier resolution with memoization and
//! single-flight fetch coalescing.

use crate::client::GraphClient;
use crate::entity::{Entity, EntityKind};
use crate::error::ResolveError;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use postern_core::Iri;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

type SharedBuild = Shared<BoxFuture<'static, Result<Entity, ResolveError>>>;

/// Resolves identifiers to fully-built typed entities.
///
/// The factory owns the one piece of shared mutable state in the system:
/// a cache of built entities keyed by identifier. The cache is unbounded
/// for the factory's lifetime; one factory is constructed per authorization
/// agent and the identifiers it resolves are bounded by that agent's
/// registry. [`EntityFactory::reload`] gives callers explicit invalidation
/// after a mutation.
///
/// Entities never hold a reference back to the factory.
pub struct EntityFactory {
    client: Arc<dyn GraphClient>,
    cache: Mutex<HashMap<Iri, Entity>>,
    in_flight: Mutex<HashMap<Iri, SharedBuild>>,
}

impl EntityFactory {
    /// Create a factory over a graph source.
    pub fn new(client: Arc<dyn GraphClient>) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// The graph source this factory resolves through.
    pub fn client(&self) -> Arc<dyn GraphClient> {
        Arc::clone(&self.client)
    }

    /// Resolve `iri` to an entity of `kind`.
    ///
    /// A second call for an identifier already resolved returns the cached
    /// entity without a fetch. Concurrent calls for the same identifier
    /// share one underlying fetch and observe the same result, success or
    /// failure. A failed fetch leaves no trace: the identifier is removed
    /// from in-flight tracking and the cache stays empty, so a later call
    /// retries.
    pub async fn build(&self, iri: &Iri, kind: EntityKind) -> Result<Entity, ResolveError> {
        if matches!(kind, EntityKind::Agent) {
            return Err(ResolveError::UnsupportedKind { kind });
        }

        if let Some(entity) = self.cache.lock().await.get(iri).cloned() {
            tracing::debug!(%iri, %kind, "entity cache hit");
            return entity.ensure_kind(kind);
        }

        let build = {
            let mut in_flight = self.in_flight.lock().await;
            match in_flight.get(iri) {
                // A build abandoned by every caller can settle with a failure
                // nobody consumed; start fresh instead of serving it stale.
                Some(shared) if !matches!(shared.peek(), Some(Err(_))) => {
                    tracing::debug!(%iri, %kind, "joining in-flight build");
                    shared.clone()
                }
                _ => {
                    let shared = Self::resolve(Arc::clone(&self.client), iri.clone(), kind)
                        .boxed()
                        .shared();
                    in_flight.insert(iri.clone(), shared.clone());
                    shared
                }
            }
        };

        let result = build.clone().await;

        // First caller to settle moves the result into the cache and clears
        // the in-flight entry; the coalesced rest find it already gone. The
        // identity check keeps a slow settler from evicting a newer build.
        let mut in_flight = self.in_flight.lock().await;
        let owns_entry = in_flight
            .get(iri)
            .is_some_and(|entry| entry.ptr_eq(&build));
        if owns_entry {
            in_flight.remove(iri);
            if let Ok(entity) = &result {
                self.cache.lock().await.insert(iri.clone(), entity.clone());
            }
        }
        drop(in_flight);

        result.and_then(|entity| entity.ensure_kind(kind))
    }

    /// The cached entity for `iri`, if one has been built.
    pub async fn cached(&self, iri: &Iri) -> Option<Entity> {
        self.cache.lock().await.get(iri).cloned()
    }

    /// Drop the cached entity for `iri` so the next build re-fetches.
    ///
    /// Callers invoke this after mutating an entity's backing graph; the
    /// cache would otherwise keep serving the pre-mutation view.
    pub async fn reload(&self, iri: &Iri) {
        self.cache.lock().await.remove(iri);
    }

    async fn resolve(
        client: Arc<dyn GraphClient>,
        iri: Iri,
        kind: EntityKind,
    ) -> Result<Entity, ResolveError> {
        tracing::debug!(%iri, %kind, "fetching graph document");
        let document = match client.fetch(&iri.document()).await {
            Ok(Some(document)) => document,
            Ok(None) => return Err(ResolveError::not_found(&iri)),
            Err(error) => return Err(ResolveError::source(&iri, error.to_string())),
        };
        Entity::from_document(kind, iri, document)
    }
}
