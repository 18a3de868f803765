//! Catalog module: records, store queries, and presentation grouping.
//!
//! The catalog holds four record types (semesters, subjects, units,
//! resources) persisted in `SQLite`. This module owns:
//! - [`CatalogStore`] - query/mutation interface over the database
//! - [`model`] - entity records and the [`ResourceType`] tag
//! - [`aggregate`] - pure grouping of resources into page sections
//! - [`registry`] - the fixed type -> display metadata table
//!
//! # Example
//!
//! ```ignore
//! use studyshelf_core::catalog::{CatalogStore, aggregate};
//! use studyshelf_core::Database;
//!
//! let db = Database::new_in_memory().await?;
//! let store = CatalogStore::new(db);
//!
//! let subject = store.subject(subject_id).await?.expect("subject exists");
//! let units = store.units_by_subject(subject_id).await?;
//! let resources = store.resources_by_subject(subject_id).await?;
//! let view = aggregate::build_subject_view(&subject, &units, &resources);
//! ```

pub mod aggregate;
mod error;
pub mod model;
pub mod registry;
mod repository;
mod store;

pub use aggregate::{ExamSection, SubjectLayout, SubjectView, UnitSection, build_subject_view};
pub use error::{CatalogDbErrorKind, CatalogError};
pub use model::{NewResource, Resource, ResourceType, Semester, Subject, Unit};
pub use registry::{SectionBehavior, TypeInfo, type_info, type_info_for_tag};
pub use repository::CatalogRepository;
pub use store::CatalogStore;

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
