//! In-memory graph client fake.

use async_trait::async_trait;
use postern_core::{GraphDocument, Iri};
use postern_data::{ClientError, GraphClient};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`GraphClient`] holding one document per identifier.
///
/// Fetches suspend once (like a real network fetch would), which is also
/// what lets two concurrent builds overlap deterministically under a
/// current-thread test runtime. Every fetch and update is recorded.
#[derive(Default)]
pub struct RecordingGraphClient {
    documents: Mutex<HashMap<Iri, GraphDocument>>,
    failures: Mutex<HashMap<Iri, String>>,
    fetches: Mutex<Vec<Iri>>,
    updates: Mutex<Vec<(Iri, GraphDocument)>>,
}

impl RecordingGraphClient {
    /// Create an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, keyed by its primary subject's document IRI.
    pub fn insert(&self, document: GraphDocument) {
        let key = document.primary_subject().document();
        self.documents.lock().unwrap().insert(key, document);
    }

    /// Remove the document at `iri`.
    pub fn remove(&self, iri: &Iri) {
        self.documents.lock().unwrap().remove(iri);
    }

    /// Make fetches of `iri` fail with a transport diagnostic.
    pub fn fail_fetch(&self, iri: &Iri, reason: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(iri.clone(), reason.to_owned());
    }

    /// The currently stored document at `iri`, updates applied.
    pub fn document(&self, iri: &Iri) -> Option<GraphDocument> {
        self.documents.lock().unwrap().get(iri).cloned()
    }

    /// How many fetches of `iri` have been issued.
    pub fn fetch_count(&self, iri: &Iri) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|fetched| *fetched == iri)
            .count()
    }

    /// Every fetch issued, in order.
    pub fn fetches(&self) -> Vec<Iri> {
        self.fetches.lock().unwrap().clone()
    }

    /// Every update issued, in order.
    pub fn updates(&self) -> Vec<(Iri, GraphDocument)> {
        self.updates.lock().unwrap().clone()
    }

    /// The documents written to `iri`, in order.
    pub fn updates_for(&self, iri: &Iri) -> Vec<GraphDocument> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .filter(|(updated, _)| updated == iri)
            .map(|(_, document)| document.clone())
            .collect()
    }
}

#[async_trait]
impl GraphClient for RecordingGraphClient {
    async fn fetch(&self, iri: &Iri) -> Result<Option<GraphDocument>, ClientError> {
        self.fetches.lock().unwrap().push(iri.clone());
        tokio::task::yield_now().await;
        if let Some(reason) = self.failures.lock().unwrap().get(iri) {
            return Err(ClientError::new(reason.as_str()));
        }
        Ok(self.documents.lock().unwrap().get(iri).cloned())
    }

    async fn update(&self, iri: &Iri, document: &GraphDocument) -> Result<(), ClientError> {
        self.updates
            .lock()
            .unwrap()
            .push((iri.clone(), document.clone()));
        tokio::task::yield_now().await;
        self.documents
            .lock()
            .unwrap()
            .insert(iri.clone(), document.clone());
        Ok(())
    }
}
