//! Repository seam for Catalog Store data access.
//!
//! This trait keeps the concrete `CatalogStore` API intact while letting
//! higher-level flows (admin panel, CLI commands) depend on an abstract
//! data-access boundary.

use async_trait::async_trait;

use super::model::{NewResource, Resource, Semester, Subject, Unit};
use super::{CatalogStore, Result};

/// Data-access contract for catalog reads and admin mutations.
///
/// `Send + Sync` bounds let `&dyn CatalogRepository` cross await points
/// in the flows that hold one.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists all semesters in display order.
    async fn list_semesters(&self) -> Result<Vec<Semester>>;

    /// Fetches one subject by id.
    async fn subject(&self, id: i64) -> Result<Option<Subject>>;

    /// Lists a semester's subjects ordered by code.
    async fn subjects_by_semester(&self, semester_id: i64) -> Result<Vec<Subject>>;

    /// Lists a subject's units ordered by unit number.
    async fn units_by_subject(&self, subject_id: i64) -> Result<Vec<Unit>>;

    /// Lists a subject's resources ordered by unit, then year descending.
    async fn resources_by_subject(&self, subject_id: i64) -> Result<Vec<Resource>>;

    /// Inserts a resource record, returning its id.
    async fn insert_resource(&self, resource: &NewResource) -> Result<i64>;

    /// Deletes a resource by id.
    async fn delete_resource(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list_semesters(&self) -> Result<Vec<Semester>> {
        CatalogStore::list_semesters(self).await
    }

    async fn subject(&self, id: i64) -> Result<Option<Subject>> {
        CatalogStore::subject(self, id).await
    }

    async fn subjects_by_semester(&self, semester_id: i64) -> Result<Vec<Subject>> {
        CatalogStore::subjects_by_semester(self, semester_id).await
    }

    async fn units_by_subject(&self, subject_id: i64) -> Result<Vec<Unit>> {
        CatalogStore::units_by_subject(self, subject_id).await
    }

    async fn resources_by_subject(&self, subject_id: i64) -> Result<Vec<Resource>> {
        CatalogStore::resources_by_subject(self, subject_id).await
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<i64> {
        CatalogStore::insert_resource(self, resource).await
    }

    async fn delete_resource(&self, id: i64) -> Result<()> {
        CatalogStore::delete_resource(self, id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::model::ResourceType;
    use crate::db::Database;

    async fn seeded_store() -> (CatalogStore, i64) {
        let db = Database::new_in_memory().await.unwrap();
        let store = CatalogStore::new(db);
        let sem = store.insert_semester("Semester 1", 1).await.unwrap();
        let subject = store
            .insert_subject("Physics", "21PH12", sem, false)
            .await
            .unwrap();
        (store, subject)
    }

    #[tokio::test]
    async fn test_repository_trait_delegates_reads() {
        let (store, subject_id) = seeded_store().await;

        let semesters = CatalogRepository::list_semesters(&store).await.unwrap();
        assert_eq!(semesters.len(), 1);

        let subject = CatalogRepository::subject(&store, subject_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subject.code, "21PH12");
    }

    #[tokio::test]
    async fn test_repository_trait_delegates_mutations() {
        let (store, subject_id) = seeded_store().await;

        let id = CatalogRepository::insert_resource(
            &store,
            &NewResource {
                title: "SEE 2024".to_string(),
                file_url: "https://example.com/see.pdf".to_string(),
                resource_type: ResourceType::See,
                unit: None,
                year: Some(2024),
                subject_id,
            },
        )
        .await
        .unwrap();

        let resources = CatalogRepository::resources_by_subject(&store, subject_id)
            .await
            .unwrap();
        assert_eq!(resources.len(), 1);

        CatalogRepository::delete_resource(&store, id).await.unwrap();
        assert!(
            CatalogRepository::resources_by_subject(&store, subject_id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
