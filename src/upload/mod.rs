//! Upload pipeline: acceptance rules, pre-flight validation, and the
//! batch coordinator that moves files into object storage.
//!
//! The flow is validate-then-transfer: every file is checked locally
//! before any network call, valid files are uploaded one at a time with
//! a per-file timeout, and the batch survives individual failures.

mod coordinator;
mod error;
mod rules;
mod validation;

pub use coordinator::{
    BatchReport, CandidateFile, DEFAULT_UPLOAD_TIMEOUT, RejectedFile, UploadCoordinator,
    UploadedFile, storage_key,
};
pub use error::{FileRejection, UploadError, classify_storage_error};
pub use rules::{
    ALLOWED_EXTENSIONS, CODE_EXTENSIONS, MAX_FILE_SIZE_BYTES, expected_mime, extension_of,
    is_allowed_extension, is_code_extension, title_label,
};
pub use validation::{FileMetadata, ValidationError, validate_batch, validate_file};
