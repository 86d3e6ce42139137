//! Permission resolution across entity documents and their containers.

use postern_data::{
    AccessMode, EntityFactory, EntityKind, Flag, GraphClient, PermissionResolver,
};
use postern_testkit::{
    add_grant, file_document, iri, project_document, registration_document, task_document,
    RecordingGraphClient,
};
use std::sync::Arc;

struct Fixture {
    client: Arc<RecordingGraphClient>,
    factory: Arc<EntityFactory>,
    resolver: PermissionResolver,
}

impl Fixture {
    fn new() -> Self {
        let client = Arc::new(RecordingGraphClient::new());
        let factory = Arc::new(EntityFactory::new(
            Arc::clone(&client) as Arc<dyn GraphClient>
        ));
        let resolver = PermissionResolver::new(Arc::clone(&factory));
        Self {
            client,
            factory,
            resolver,
        }
    }
}

fn alice() -> postern_core::Iri {
    iri("https://alice.example/#id")
}

fn registration_iri() -> postern_core::Iri {
    iri("https://auth.alice.example/registrations/projectron")
}

fn project_iri() -> postern_core::Iri {
    iri("https://alice.example/projects/garden")
}

#[tokio::test]
async fn no_applicable_grant_resolves_every_flag_to_denied() {
    let fixture = Fixture::new();
    fixture.client.insert(registration_document(
        &registration_iri(),
        "Projectron",
        &alice(),
    ));
    fixture.client.insert(project_document(
        &project_iri(),
        "Garden",
        &alice(),
        &registration_iri(),
    ));

    let project = fixture
        .factory
        .build(&project_iri(), EntityKind::Project)
        .await
        .unwrap()
        .into_project()
        .unwrap();
    let flags = fixture
        .resolver
        .resolve_project(&project, &alice())
        .await
        .unwrap();

    assert_eq!(flags.can_update, Flag::Denied);
    assert_eq!(flags.can_add_tasks, Flag::Denied);
    assert_eq!(flags.can_add_images, Flag::Denied);
    assert_eq!(flags.can_add_files, Flag::Denied);
    assert!(flags.can_update.resolved());
}

#[tokio::test]
async fn registration_grants_reach_contained_projects() {
    let fixture = Fixture::new();
    let mut registration = registration_document(&registration_iri(), "Projectron", &alice());
    add_grant(
        &mut registration,
        &iri("https://auth.alice.example/registrations/projectron#grant-1"),
        &alice(),
        &registration_iri(),
        &[AccessMode::Create, AccessMode::Update],
    );
    fixture.client.insert(registration);
    fixture.client.insert(project_document(
        &project_iri(),
        "Garden",
        &alice(),
        &registration_iri(),
    ));

    let project = fixture
        .factory
        .build(&project_iri(), EntityKind::Project)
        .await
        .unwrap()
        .into_project()
        .unwrap();
    let flags = fixture
        .resolver
        .resolve_project(&project, &alice())
        .await
        .unwrap();

    assert_eq!(flags.can_update, Flag::Granted);
    assert_eq!(flags.can_add_tasks, Flag::Granted);
    assert_eq!(flags.can_add_images, Flag::Granted);
    assert_eq!(flags.can_add_files, Flag::Granted);
}

#[tokio::test]
async fn direct_project_grants_shadow_registration_grants() {
    let fixture = Fixture::new();
    let mut registration = registration_document(&registration_iri(), "Projectron", &alice());
    add_grant(
        &mut registration,
        &iri("https://auth.alice.example/registrations/projectron#grant-1"),
        &alice(),
        &registration_iri(),
        &[AccessMode::Create, AccessMode::Update],
    );
    fixture.client.insert(registration);
    let mut project = project_document(&project_iri(), "Garden", &alice(), &registration_iri());
    add_grant(
        &mut project,
        &iri("https://alice.example/projects/garden#grant-1"),
        &alice(),
        &project_iri(),
        &[AccessMode::Update],
    );
    fixture.client.insert(project);

    let project = fixture
        .factory
        .build(&project_iri(), EntityKind::Project)
        .await
        .unwrap()
        .into_project()
        .unwrap();
    let flags = fixture
        .resolver
        .resolve_project(&project, &alice())
        .await
        .unwrap();

    assert_eq!(flags.can_update, Flag::Granted);
    assert_eq!(flags.can_add_tasks, Flag::Denied);
}

#[tokio::test]
async fn tasks_inherit_grants_from_their_project() {
    let fixture = Fixture::new();
    let task_iri = iri("https://alice.example/projects/garden/tasks/prune");
    let mut project = project_document(&project_iri(), "Garden", &alice(), &registration_iri());
    add_grant(
        &mut project,
        &iri("https://alice.example/projects/garden#grant-1"),
        &alice(),
        &project_iri(),
        &[AccessMode::Update, AccessMode::Delete],
    );
    fixture.client.insert(project);
    fixture.client.insert(task_document(
        &task_iri,
        "{\"status\":\"open\"}",
        &project_iri(),
        &alice(),
    ));

    let task = fixture
        .factory
        .build(&task_iri, EntityKind::Task)
        .await
        .unwrap()
        .into_task()
        .unwrap();
    let flags = fixture.resolver.resolve_task(&task, &alice()).await.unwrap();

    assert_eq!(flags.can_update, Flag::Granted);
    assert_eq!(flags.can_delete, Flag::Granted);
}

#[tokio::test]
async fn file_grants_in_its_own_document_need_no_container() {
    let fixture = Fixture::new();
    let file_iri = iri("https://alice.example/projects/garden/files/plan.pdf");
    let mut file = file_document(
        &file_iri,
        Some("plan.pdf"),
        &project_iri(),
        &alice(),
        false,
    );
    add_grant(
        &mut file,
        &iri("https://alice.example/projects/garden/files/plan.pdf#grant-1"),
        &alice(),
        &file_iri,
        &[AccessMode::Update],
    );
    fixture.client.insert(file);

    let file = fixture
        .factory
        .build(&file_iri, EntityKind::FileInstance)
        .await
        .unwrap()
        .into_file_instance()
        .unwrap();
    let flags = fixture
        .resolver
        .resolve_file_instance(&file, &alice())
        .await
        .unwrap();

    assert_eq!(flags.can_update, Flag::Granted);
    assert_eq!(flags.can_delete, Flag::Denied);
    // nothing needed the project document
    assert!(fixture.client.fetch_count(&project_iri()) == 0);
}

#[tokio::test]
async fn registration_flags_derive_from_its_own_grants() {
    let fixture = Fixture::new();
    let mut registration = registration_document(&registration_iri(), "Projectron", &alice());
    add_grant(
        &mut registration,
        &iri("https://auth.alice.example/registrations/projectron#grant-1"),
        &alice(),
        &registration_iri(),
        &[AccessMode::Create],
    );
    fixture.client.insert(registration);

    let registration = fixture
        .factory
        .build(&registration_iri(), EntityKind::Registration)
        .await
        .unwrap()
        .into_registration()
        .unwrap();
    let flags = fixture
        .resolver
        .resolve_registration(&registration, &alice())
        .await
        .unwrap();

    assert_eq!(flags.can_create, Flag::Granted);
    assert_eq!(flags.can_update, Flag::Denied);
}
