//! StudyShelf Core Library
//!
//! This library provides the core functionality for the StudyShelf
//! student resource portal: a semester/subject/unit catalog of study
//! materials, file upload into object storage, and preview resolution
//! for stored resource URLs.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`db`] - Database connection and schema management
//! - [`catalog`] - Semesters, subjects, units, resources, and the
//!   per-subject view aggregation
//! - [`storage`] - Object storage client boundary
//! - [`upload`] - File validation and the batch upload coordinator
//! - [`preview`] - Resource URL classification and text fetching
//! - [`auth`] - Sessions and role gating
//! - [`admin`] - Role-gated catalog mutations

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod db;
pub mod preview;
pub mod storage;
pub mod upload;

// Re-export commonly used types
pub use admin::{AddResource, AddedResource, AdminError, AdminPanel, UploadReport};
pub use auth::{ADMIN_ROLE, AuthError, RoleStore, Session};
pub use catalog::{
    CatalogError, CatalogRepository, CatalogStore, NewResource, Resource, ResourceType,
    SectionBehavior, Semester, Subject, SubjectLayout, SubjectView, TypeInfo, Unit,
    build_subject_view, type_info, type_info_for_tag,
};
pub use db::{Database, DbError};
pub use preview::{Preview, PreviewKind, TextFetcher, resolve_preview};
pub use storage::{HttpObjectStore, ObjectStore, StorageError};
pub use upload::{
    BatchReport, CandidateFile, DEFAULT_UPLOAD_TIMEOUT, FileMetadata, FileRejection,
    MAX_FILE_SIZE_BYTES, UploadCoordinator, UploadError, UploadedFile, ValidationError,
    validate_file,
};
