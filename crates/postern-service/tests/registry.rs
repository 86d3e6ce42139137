//! Registration lookup in the agent registry.

use assert_matches::assert_matches;
use postern_core::Iri;
use postern_data::{EntityFactory, GraphClient, ResolveError};
use postern_service::{RegistryService, ServiceError};
use postern_testkit::{
    application_document, iri, registration_document, registry_document, RecordingGraphClient,
};
use std::sync::Arc;

fn registry_set() -> Iri {
    iri("https://auth.alice.example/registry")
}

fn service_over(client: &Arc<RecordingGraphClient>) -> RegistryService {
    let factory = Arc::new(EntityFactory::new(
        Arc::clone(client) as Arc<dyn GraphClient>
    ));
    RegistryService::new(factory, registry_set())
}

#[tokio::test]
async fn finds_the_registration_matching_the_web_id() {
    let client = Arc::new(RecordingGraphClient::new());
    let bob_registration = iri("https://auth.alice.example/registrations/bob-app");
    let alice_registration = iri("https://auth.alice.example/registrations/projectron");
    client.insert(registry_document(
        &registry_set(),
        &[bob_registration.clone(), alice_registration.clone()],
    ));
    client.insert(registration_document(
        &bob_registration,
        "Bob's app",
        &iri("https://bob.example/#id"),
    ));
    client.insert(registration_document(
        &alice_registration,
        "Projectron",
        &iri("https://alice.example/#id"),
    ));

    let registration = service_over(&client)
        .find_social_agent_registration(&iri("https://alice.example/#id"))
        .await
        .unwrap();

    assert_eq!(registration.iri(), &alice_registration);
    assert_eq!(registration.label(), "Projectron");
}

#[tokio::test]
async fn absence_is_an_error_not_a_creation() {
    let client = Arc::new(RecordingGraphClient::new());
    client.insert(registry_document(&registry_set(), &[]));

    let error = service_over(&client)
        .find_social_agent_registration(&iri("https://alice.example/#id"))
        .await
        .unwrap_err();

    assert_matches!(error, ServiceError::RegistrationNotFound { .. });
    // lookup never writes
    assert!(client.updates().is_empty());
}

#[tokio::test]
async fn a_listed_document_of_the_wrong_shape_is_malformed() {
    let client = Arc::new(RecordingGraphClient::new());
    let listed = iri("https://auth.alice.example/registrations/not-a-registration");
    client.insert(registry_document(&registry_set(), &[listed.clone()]));
    // the registry points at an application document by mistake
    client.insert(application_document(&listed, "Projectron", None));

    let error = service_over(&client)
        .find_social_agent_registration(&iri("https://alice.example/#id"))
        .await
        .unwrap_err();

    assert_matches!(
        error,
        ServiceError::Resolve(ResolveError::MalformedGraph { .. })
    );
}
