//! Factory resolution semantics: memoization, single-flight coalescing,
//! and failure hygiene.

use assert_matches::assert_matches;
use postern_data::{EntityFactory, EntityKind, GraphClient, ResolveError};
use postern_testkit::{
    access_receipt_document, application_document, iri, registration_document,
    RecordingGraphClient,
};
use std::sync::Arc;

fn factory_over(client: &Arc<RecordingGraphClient>) -> EntityFactory {
    EntityFactory::new(Arc::clone(client) as Arc<dyn GraphClient>)
}

fn seeded_registration(client: &RecordingGraphClient) -> postern_core::Iri {
    let registration = iri("https://auth.alice.example/registrations/projectron");
    client.insert(registration_document(
        &registration,
        "Projectron",
        &iri("https://alice.example/#id"),
    ));
    registration
}

#[tokio::test]
async fn concurrent_builds_share_one_fetch() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = seeded_registration(&client);
    let factory = factory_over(&client);

    let (first, second) = tokio::join!(
        factory.build(&registration, EntityKind::Registration),
        factory.build(&registration, EntityKind::Registration),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.fetch_count(&registration), 1);
}

#[tokio::test]
async fn second_build_is_served_from_cache() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = seeded_registration(&client);
    let factory = factory_over(&client);

    factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap();
    factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap();

    assert_eq!(client.fetch_count(&registration), 1);
}

#[tokio::test]
async fn not_found_leaves_no_cache_entry() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = iri("https://auth.alice.example/registrations/projectron");
    let factory = factory_over(&client);

    let error = factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap_err();
    assert_matches!(error, ResolveError::NotFound { .. });
    assert_eq!(factory.cached(&registration).await, None);

    // the document appears later; a retry issues a fresh fetch
    client.insert(registration_document(
        &registration,
        "Projectron",
        &iri("https://alice.example/#id"),
    ));
    factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap();
    assert_eq!(client.fetch_count(&registration), 2);
}

#[tokio::test]
async fn coalesced_callers_share_the_same_failure() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = iri("https://auth.alice.example/registrations/projectron");
    let factory = factory_over(&client);

    let (first, second) = tokio::join!(
        factory.build(&registration, EntityKind::Registration),
        factory.build(&registration, EntityKind::Registration),
    );

    assert_matches!(first, Err(ResolveError::NotFound { .. }));
    assert_matches!(second, Err(ResolveError::NotFound { .. }));
    assert_eq!(client.fetch_count(&registration), 1);
}

#[tokio::test]
async fn transport_failures_surface_as_source_errors() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = iri("https://auth.alice.example/registrations/projectron");
    client.fail_fetch(&registration, "connection reset");
    let factory = factory_over(&client);

    let error = factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap_err();
    assert_matches!(error, ResolveError::Source { .. });
    assert_eq!(factory.cached(&registration).await, None);
}

#[tokio::test]
async fn cached_entity_of_another_kind_is_rejected() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = seeded_registration(&client);
    let factory = factory_over(&client);

    factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap();
    let error = factory
        .build(&registration, EntityKind::Project)
        .await
        .unwrap_err();

    assert_matches!(error, ResolveError::MalformedGraph { .. });
    assert_eq!(client.fetch_count(&registration), 1);
}

#[tokio::test]
async fn agent_kind_is_unsupported_and_never_fetched() {
    let client = Arc::new(RecordingGraphClient::new());
    let web_id = iri("https://alice.example/#id");
    let factory = factory_over(&client);

    let error = factory.build(&web_id, EntityKind::Agent).await.unwrap_err();

    assert_matches!(
        error,
        ResolveError::UnsupportedKind {
            kind: EntityKind::Agent
        }
    );
    assert!(client.fetches().is_empty());
}

#[tokio::test]
async fn reload_drops_the_cached_entity() {
    let client = Arc::new(RecordingGraphClient::new());
    let registration = seeded_registration(&client);
    let factory = factory_over(&client);

    factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap();
    factory.reload(&registration).await;
    factory
        .build(&registration, EntityKind::Registration)
        .await
        .unwrap();

    assert_eq!(client.fetch_count(&registration), 2);
}

#[tokio::test]
async fn fragment_identifiers_fetch_their_document() {
    let client = Arc::new(RecordingGraphClient::new());
    let profile = iri("https://projectron.example/profile#id");
    let need_group = iri("https://projectron.example/needs#need-group-pm");
    client.insert(application_document(&profile, "Projectron", Some(&need_group)));
    let factory = factory_over(&client);

    let entity = factory
        .build(&profile, EntityKind::ApplicationProfile)
        .await
        .unwrap();

    assert_eq!(entity.iri(), &profile);
    assert_eq!(
        client.fetches(),
        vec![iri("https://projectron.example/profile")]
    );
}

#[tokio::test]
async fn access_receipts_build_only_through_the_factory() {
    let client = Arc::new(RecordingGraphClient::new());
    let receipt = iri("https://auth.alice.example/receipts/projectron");
    let need_group = iri("https://projectron.example/needs#need-group-pm");
    client.insert(access_receipt_document(
        &receipt,
        &iri("https://projectron.example/profile#id"),
        Some(&need_group),
    ));
    let factory = factory_over(&client);

    let receipt = factory
        .build(&receipt, EntityKind::AccessReceipt)
        .await
        .unwrap()
        .into_access_receipt()
        .unwrap();

    assert_eq!(
        receipt.provided_to().as_str(),
        "https://projectron.example/profile#id"
    );
    assert_eq!(receipt.access_need_group(), Some(&need_group));
}
