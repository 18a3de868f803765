//! Integration tests for the catalog module.
//!
//! These tests verify catalog queries and subject-view aggregation
//! against a real SQLite database.

use studyshelf_core::catalog::build_subject_view;
use studyshelf_core::{
    CatalogError, CatalogStore, Database, NewResource, ResourceType, SubjectLayout,
};
use tempfile::TempDir;

/// Helper to create a test database with migrations applied.
async fn setup_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");

    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");

    (db, temp_dir)
}

fn resource(
    subject_id: i64,
    title: &str,
    resource_type: ResourceType,
    unit: Option<&str>,
    year: Option<i64>,
) -> NewResource {
    NewResource {
        title: title.to_string(),
        file_url: format!("https://example.com/{}.pdf", title.replace(' ', "-")),
        resource_type,
        unit: unit.map(ToString::to_string),
        year,
        subject_id,
    }
}

// ==================== Catalog Navigation ====================

#[tokio::test]
async fn test_semester_subject_navigation() {
    let (db, _temp_dir) = setup_test_db().await;
    let store = CatalogStore::new(db);

    let sem1 = store
        .insert_semester("Semester 1", 1)
        .await
        .expect("Failed to insert semester");
    let sem2 = store
        .insert_semester("Semester 2", 2)
        .await
        .expect("Failed to insert semester");

    store
        .insert_subject("Engineering Physics", "21PH12", sem1, false)
        .await
        .expect("Failed to insert subject");
    store
        .insert_subject("Engineering Chemistry", "21CH22", sem2, false)
        .await
        .expect("Failed to insert subject");

    let semesters = store.list_semesters().await.expect("Failed to list");
    assert_eq!(semesters.len(), 2);
    assert_eq!(semesters[0].name, "Semester 1");

    let subjects = store
        .subjects_by_semester(sem1)
        .await
        .expect("Failed to list subjects");
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].code, "21PH12");
}

#[tokio::test]
async fn test_resources_scoped_to_subject() {
    let (db, _temp_dir) = setup_test_db().await;
    let store = CatalogStore::new(db);

    let sem = store.insert_semester("Semester 3", 3).await.expect("insert");
    let ds = store
        .insert_subject("Data Structures", "21CS32", sem, false)
        .await
        .expect("insert");
    let os = store
        .insert_subject("Operating Systems", "21CS33", sem, false)
        .await
        .expect("insert");

    store
        .insert_resource(&resource(ds, "DS Notes", ResourceType::Notes, Some("Unit 1"), None))
        .await
        .expect("insert");
    store
        .insert_resource(&resource(os, "OS Notes", ResourceType::Notes, Some("Unit 1"), None))
        .await
        .expect("insert");

    let ds_resources = store.resources_by_subject(ds).await.expect("query");
    assert_eq!(ds_resources.len(), 1);
    assert_eq!(ds_resources[0].title, "DS Notes");
}

// ==================== Subject View (Unit-Wise) ====================

#[tokio::test]
async fn test_unit_wise_view_end_to_end() {
    let (db, _temp_dir) = setup_test_db().await;
    let store = CatalogStore::new(db);

    let sem = store.insert_semester("Semester 2", 2).await.expect("insert");
    let subject_id = store
        .insert_subject("Engineering Mathematics II", "21MA21", sem, false)
        .await
        .expect("insert");

    store
        .insert_unit(subject_id, 1, "Vector Calculus")
        .await
        .expect("insert");
    store
        .insert_unit(subject_id, 2, "Differential Equations")
        .await
        .expect("insert");

    store
        .insert_resource(&resource(
            subject_id,
            "Unit 1 Notes",
            ResourceType::Notes,
            Some("Unit 1"),
            None,
        ))
        .await
        .expect("insert");
    store
        .insert_resource(&resource(
            subject_id,
            "CIE-1 2024",
            ResourceType::Cie1,
            None,
            Some(2024),
        ))
        .await
        .expect("insert");
    store
        .insert_resource(&resource(subject_id, "SEE 2023", ResourceType::See, None, Some(2023)))
        .await
        .expect("insert");
    store
        .insert_resource(&resource(subject_id, "Grewal", ResourceType::Book, None, None))
        .await
        .expect("insert");

    let subject = store
        .subject(subject_id)
        .await
        .expect("query")
        .expect("subject exists");
    let units = store.units_by_subject(subject_id).await.expect("query");
    let resources = store.resources_by_subject(subject_id).await.expect("query");

    let view = build_subject_view(&subject, &units, &resources);
    assert!(view.is_unit_wise());

    // Mathematics subject: books section is labeled Question Bank
    assert_eq!(view.books_label, "Question Bank");
    assert_eq!(view.books.len(), 1);

    match &view.layout {
        SubjectLayout::UnitWise { units, cie, see } => {
            // One section per actual unit row, not a fixed range
            assert_eq!(units.len(), 2);
            assert_eq!(units[0].title, "Vector Calculus");
            assert_eq!(units[0].notes.len(), 1);
            // Empty unit kept as explicit empty state
            assert_eq!(units[1].notes.len(), 0);

            assert_eq!(cie.len(), 3);
            assert_eq!(cie[0].papers.len(), 1);
            assert_eq!(cie[1].papers.len(), 0);

            assert_eq!(see.papers.len(), 1);
        }
        SubjectLayout::Flat { .. } => panic!("expected unit-wise layout"),
    }
}

// ==================== Subject View (Flat) ====================

#[tokio::test]
async fn test_flat_view_for_subject_without_units() {
    let (db, _temp_dir) = setup_test_db().await;
    let store = CatalogStore::new(db);

    let sem = store.insert_semester("Semester 8", 8).await.expect("insert");
    let subject_id = store
        .insert_subject("Technical Seminar", "21CS81", sem, false)
        .await
        .expect("insert");

    // A unit-labeled note still lands in the flat list when the subject
    // has no unit rows
    store
        .insert_resource(&resource(
            subject_id,
            "Seminar Guide",
            ResourceType::Notes,
            Some("Unit 1"),
            None,
        ))
        .await
        .expect("insert");

    let subject = store
        .subject(subject_id)
        .await
        .expect("query")
        .expect("subject exists");
    let units = store.units_by_subject(subject_id).await.expect("query");
    let resources = store.resources_by_subject(subject_id).await.expect("query");

    let view = build_subject_view(&subject, &units, &resources);
    assert!(!view.is_unit_wise());
    assert_eq!(view.books_label, "Reference Books");

    match &view.layout {
        SubjectLayout::Flat { notes } => assert_eq!(notes.len(), 1),
        SubjectLayout::UnitWise { .. } => panic!("expected flat layout"),
    }
}

// ==================== Deletion ====================

#[tokio::test]
async fn test_delete_resource_then_delete_again_is_not_found() {
    let (db, _temp_dir) = setup_test_db().await;
    let store = CatalogStore::new(db);

    let sem = store.insert_semester("Semester 1", 1).await.expect("insert");
    let subject_id = store
        .insert_subject("Engineering Physics", "21PH12", sem, false)
        .await
        .expect("insert");
    let id = store
        .insert_resource(&resource(subject_id, "Notes", ResourceType::Notes, None, None))
        .await
        .expect("insert");

    store.delete_resource(id).await.expect("first delete succeeds");

    // Concurrent-admin shape: the row is already gone
    let err = store.delete_resource(id).await.expect_err("second delete fails");
    assert!(matches!(err, CatalogError::RecordNotFound { .. }));
}

#[tokio::test]
async fn test_unknown_type_tag_reaches_view_unharmed() {
    let (db, _temp_dir) = setup_test_db().await;
    let store = CatalogStore::new(db.clone());

    let sem = store.insert_semester("Semester 1", 1).await.expect("insert");
    let subject_id = store
        .insert_subject("Engineering Physics", "21PH12", sem, false)
        .await
        .expect("insert");

    sqlx::query(
        "INSERT INTO resources (title, file_url, type, subject_id) \
         VALUES ('Flashcards', 'https://example.com/f', 'flashcards', ?)",
    )
    .bind(subject_id)
    .execute(db.pool())
    .await
    .expect("raw insert");

    let subject = store
        .subject(subject_id)
        .await
        .expect("query")
        .expect("subject exists");
    let resources = store.resources_by_subject(subject_id).await.expect("query");
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].resource_type(), None);

    // The unknown tag lands in no section but the view still builds
    let view = build_subject_view(&subject, &[], &resources);
    match &view.layout {
        SubjectLayout::Flat { notes } => assert!(notes.is_empty()),
        SubjectLayout::UnitWise { .. } => panic!("expected flat layout"),
    }
    assert!(view.books.is_empty());
}
