//! Catalog Store queries over the SQLite database.
//!
//! Read operations are simple equality/ordering queries; writes are the
//! admin-only insert/delete calls. The store never assumes exclusive
//! access: concurrent admin sessions may write at any time, and
//! last-write-wins is the database's responsibility.

use tracing::instrument;

use super::error::CatalogError;
use super::model::{NewResource, Resource, Semester, Subject, Unit};
use super::Result;
use crate::db::Database;

/// Returns `Ok(())` if at least one row was affected; otherwise
/// [`CatalogError::RecordNotFound`].
fn check_affected(table: &'static str, id: i64, rows_affected: u64) -> Result<()> {
    if rows_affected == 0 {
        Err(CatalogError::not_found(table, id))
    } else {
        Ok(())
    }
}

/// Query/mutation interface for the catalog tables.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    db: Database,
}

impl CatalogStore {
    /// Creates a store over an open database handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Lists all semesters in display order.
    #[instrument(skip(self))]
    pub async fn list_semesters(&self) -> Result<Vec<Semester>> {
        let semesters = sqlx::query_as::<_, Semester>(
            "SELECT id, name, sort_order FROM semesters ORDER BY sort_order",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(semesters)
    }

    /// Inserts a semester, returning its id.
    #[instrument(skip(self))]
    pub async fn insert_semester(&self, name: &str, sort_order: i64) -> Result<i64> {
        let result = sqlx::query("INSERT INTO semesters (name, sort_order) VALUES (?, ?)")
            .bind(name)
            .bind(sort_order)
            .execute(self.db.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Fetches one subject by id.
    #[instrument(skip(self))]
    pub async fn subject(&self, id: i64) -> Result<Option<Subject>> {
        let subject = sqlx::query_as::<_, Subject>(
            "SELECT id, name, code, semester_id, is_lab FROM subjects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(subject)
    }

    /// Lists a semester's subjects ordered by code.
    #[instrument(skip(self))]
    pub async fn subjects_by_semester(&self, semester_id: i64) -> Result<Vec<Subject>> {
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name, code, semester_id, is_lab FROM subjects \
             WHERE semester_id = ? ORDER BY code",
        )
        .bind(semester_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(subjects)
    }

    /// Inserts a subject, returning its id.
    #[instrument(skip(self))]
    pub async fn insert_subject(
        &self,
        name: &str,
        code: &str,
        semester_id: i64,
        is_lab: bool,
    ) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO subjects (name, code, semester_id, is_lab) VALUES (?, ?, ?, ?)")
                .bind(name)
                .bind(code)
                .bind(semester_id)
                .bind(is_lab)
                .execute(self.db.pool())
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Lists a subject's units ordered by unit number.
    #[instrument(skip(self))]
    pub async fn units_by_subject(&self, subject_id: i64) -> Result<Vec<Unit>> {
        let units = sqlx::query_as::<_, Unit>(
            "SELECT id, unit_number, unit_name, subject_id FROM units \
             WHERE subject_id = ? ORDER BY unit_number",
        )
        .bind(subject_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(units)
    }

    /// Inserts a unit, returning its id.
    #[instrument(skip(self))]
    pub async fn insert_unit(
        &self,
        subject_id: i64,
        unit_number: i64,
        unit_name: &str,
    ) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO units (unit_number, unit_name, subject_id) VALUES (?, ?, ?)")
                .bind(unit_number)
                .bind(unit_name)
                .bind(subject_id)
                .execute(self.db.pool())
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Lists a subject's resources ordered by unit, then year descending.
    #[instrument(skip(self))]
    pub async fn resources_by_subject(&self, subject_id: i64) -> Result<Vec<Resource>> {
        let resources = sqlx::query_as::<_, Resource>(
            "SELECT id, title, file_url, type, unit, year, subject_id FROM resources \
             WHERE subject_id = ? ORDER BY unit, year DESC",
        )
        .bind(subject_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(resources)
    }

    /// Inserts a resource record, returning its id.
    #[instrument(skip(self, resource), fields(subject_id = resource.subject_id, resource_type = resource.resource_type.as_str()))]
    pub async fn insert_resource(&self, resource: &NewResource) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO resources (title, file_url, type, unit, year, subject_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&resource.title)
        .bind(&resource.file_url)
        .bind(resource.resource_type.as_str())
        .bind(&resource.unit)
        .bind(resource.year)
        .bind(resource.subject_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Deletes a resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RecordNotFound`] if no such resource exists
    /// (e.g. already deleted by a concurrent admin session).
    #[instrument(skip(self))]
    pub async fn delete_resource(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM resources WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        check_affected("resources", id, result.rows_affected())
    }
}
