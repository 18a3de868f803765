//! Admin workflows: the role-gated mutations of the catalog.
//!
//! Every entry point verifies the admin role before touching data.
//! The upload flow composes the upload coordinator with catalog
//! insertion: only the succeeded subset of a batch becomes resource
//! rows, and a batch with zero successes inserts nothing at all.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::auth::{AuthError, RoleStore, Session};
use crate::catalog::{CatalogError, CatalogRepository, NewResource, ResourceType};
use crate::storage::ObjectStore;
use crate::upload::{CandidateFile, RejectedFile, UploadCoordinator, UploadError};

/// Failures of an admin operation.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The caller is not an authorized admin.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A catalog read or write failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The whole upload batch was rejected; nothing was inserted.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Fields for a manually added resource (an external link, typically
/// a Google Drive share URL).
#[derive(Debug, Clone)]
pub struct AddResource {
    /// Target subject.
    pub subject_id: i64,
    /// Display title.
    pub title: String,
    /// Where the resource lives.
    pub file_url: String,
    /// Section the resource belongs to.
    pub resource_type: ResourceType,
    /// Unit number; only meaningful for notes.
    pub unit_number: Option<i64>,
    /// Exam year, for paper types.
    pub year: Option<i64>,
}

/// One resource row created by a batch upload.
#[derive(Debug, Clone)]
pub struct AddedResource {
    /// Catalog row id.
    pub id: i64,
    /// Synthesized title.
    pub title: String,
    /// Public URL of the stored file.
    pub file_url: String,
}

/// Outcome of an admin batch upload: inserted rows plus every per-file
/// rejection, named individually for user feedback.
#[derive(Debug)]
pub struct UploadReport {
    /// Resources inserted into the catalog, in upload order.
    pub added: Vec<AddedResource>,
    /// Files that did not make it, with reasons.
    pub rejected: Vec<RejectedFile>,
}

impl UploadReport {
    /// One-line summary for display after the batch finishes.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} file(s) added, {} rejected",
            self.added.len(),
            self.rejected.len()
        )
    }
}

/// Role-gated mutation surface over the catalog and object storage.
///
/// Catalog access goes through the [`CatalogRepository`] seam, so the
/// panel works against any data-access backend, not just the SQLite
/// store.
pub struct AdminPanel<'a> {
    roles: &'a RoleStore,
    catalog: &'a dyn CatalogRepository,
    store: &'a dyn ObjectStore,
}

impl<'a> AdminPanel<'a> {
    /// Creates the panel over its collaborators.
    #[must_use]
    pub fn new(
        roles: &'a RoleStore,
        catalog: &'a dyn CatalogRepository,
        store: &'a dyn ObjectStore,
    ) -> Self {
        Self {
            roles,
            catalog,
            store,
        }
    }

    /// Adds a single link-backed resource to a subject.
    ///
    /// The stored unit label is `"Unit {n}"` only when the resource is
    /// notes and a unit was chosen; every other combination stores no
    /// unit, so exam papers never leak into unit sections.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Auth`] for missing/insufficient role and
    /// [`AdminError::Catalog`] if the subject is missing or the insert
    /// fails.
    #[instrument(skip(self, session, request), fields(subject_id = request.subject_id))]
    pub async fn add_resource(
        &self,
        session: Option<&Session>,
        request: AddResource,
    ) -> Result<i64, AdminError> {
        self.roles.ensure_admin(session).await?;
        self.require_subject(request.subject_id).await?;

        let unit = match (request.resource_type, request.unit_number) {
            (ResourceType::Notes, Some(n)) => Some(format!("Unit {n}")),
            _ => None,
        };

        let id = self
            .catalog
            .insert_resource(&NewResource {
                title: request.title,
                file_url: request.file_url,
                resource_type: request.resource_type,
                unit,
                year: request.year,
                subject_id: request.subject_id,
            })
            .await?;
        info!(id, "resource added");
        Ok(id)
    }

    /// Deletes a resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Auth`] for missing/insufficient role and
    /// [`AdminError::Catalog`] if no such resource exists.
    #[instrument(skip(self, session))]
    pub async fn delete_resource(
        &self,
        session: Option<&Session>,
        id: i64,
    ) -> Result<(), AdminError> {
        self.roles.ensure_admin(session).await?;
        self.catalog.delete_resource(id).await?;
        info!(id, "resource deleted");
        Ok(())
    }

    /// Uploads a batch of files and inserts the succeeded subset as
    /// resources of the given type.
    ///
    /// Files are validated, uploaded sequentially, and inserted only
    /// after their transfer succeeds. If every file of a non-empty
    /// batch is rejected, the operation fails with
    /// [`UploadError::AllFilesRejected`] and no rows are inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Auth`], [`AdminError::Catalog`], or
    /// [`AdminError::Upload`] for a fully rejected batch.
    #[instrument(skip(self, session, files), fields(subject_id, files = files.len()))]
    pub async fn upload_resources(
        &self,
        session: Option<&Session>,
        subject_id: i64,
        resource_type: ResourceType,
        unit_number: Option<i64>,
        files: Vec<CandidateFile>,
    ) -> Result<UploadReport, AdminError> {
        self.roles.ensure_admin(session).await?;
        self.require_subject(subject_id).await?;

        let attempted = files.len();
        let coordinator = UploadCoordinator::new(self.store);
        let report = coordinator.upload_batch(subject_id, files).await;

        if report.all_failed() {
            warn!(attempted, "all files rejected; inserting nothing");
            return Err(UploadError::AllFilesRejected { attempted }.into());
        }

        let unit = match (resource_type, unit_number) {
            (ResourceType::Notes, Some(n)) => Some(format!("Unit {n}")),
            _ => None,
        };

        let mut added = Vec::with_capacity(report.uploaded.len());
        for file in report.uploaded {
            let id = self
                .catalog
                .insert_resource(&NewResource {
                    title: file.title.clone(),
                    file_url: file.file_url.clone(),
                    resource_type,
                    unit: unit.clone(),
                    year: None,
                    subject_id,
                })
                .await?;
            added.push(AddedResource {
                id,
                title: file.title,
                file_url: file.file_url,
            });
        }

        info!(added = added.len(), rejected = report.rejected.len(), "batch upload recorded");
        Ok(UploadReport {
            added,
            rejected: report.rejected,
        })
    }

    async fn require_subject(&self, subject_id: i64) -> Result<(), AdminError> {
        if self.catalog.subject(subject_id).await?.is_none() {
            return Err(CatalogError::not_found("subjects", subject_id).into());
        }
        Ok(())
    }
}
