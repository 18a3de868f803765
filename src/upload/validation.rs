//! Pre-flight file validation: pure, synchronous, no network.
//!
//! Each file is checked independently and all failures are collected,
//! so the caller can report every invalid file at once instead of
//! aborting at the first.

use thiserror::Error;

use super::rules::{
    MAX_FILE_SIZE_BYTES, expected_mime, extension_of, is_allowed_extension, is_code_extension,
    mime_primary,
};

/// Name/size/type description of a candidate file, as reported by the
/// selection surface.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Original filename, including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Reported MIME type; often empty or absent for code files.
    pub mime_type: Option<String>,
}

/// Per-file validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// File exceeds the size cap.
    #[error("{name} is too large ({size} bytes; limit {limit} bytes)")]
    FileTooLarge {
        /// Offending filename.
        name: String,
        /// Reported size in bytes.
        size: u64,
        /// The configured cap.
        limit: u64,
    },

    /// Extension missing or outside the accepted set.
    #[error("{name} has an unsupported file type ({extension})")]
    InvalidExtension {
        /// Offending filename.
        name: String,
        /// The rejected extension, or `"none"` when absent.
        extension: String,
    },

    /// Reported MIME type contradicts the extension.
    #[error("{name} reports MIME type {mime}, expected a {expected_primary} type")]
    InvalidMimeType {
        /// Offending filename.
        name: String,
        /// The reported MIME type.
        mime: String,
        /// Primary type the extension implies.
        expected_primary: String,
    },
}

impl ValidationError {
    /// The filename this failure belongs to.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::FileTooLarge { name, .. }
            | Self::InvalidExtension { name, .. }
            | Self::InvalidMimeType { name, .. } => name,
        }
    }
}

/// Validates one file against the acceptance rules.
///
/// Checks, in order: size cap, extension allow-list, MIME primary-type
/// agreement. The MIME check is skipped entirely for source-code
/// extensions, and an absent or empty reported MIME always passes.
///
/// # Errors
///
/// Returns the first applicable [`ValidationError`] for this file.
pub fn validate_file(file: &FileMetadata) -> Result<(), ValidationError> {
    if file.size > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::FileTooLarge {
            name: file.name.clone(),
            size: file.size,
            limit: MAX_FILE_SIZE_BYTES,
        });
    }

    let Some(extension) = extension_of(&file.name) else {
        return Err(ValidationError::InvalidExtension {
            name: file.name.clone(),
            extension: "none".to_string(),
        });
    };

    if !is_allowed_extension(&extension) {
        return Err(ValidationError::InvalidExtension {
            name: file.name.clone(),
            extension,
        });
    }

    if is_code_extension(&extension) {
        return Ok(());
    }

    if let Some(mime) = file.mime_type.as_deref()
        && !mime.is_empty()
        && let Some(expected) = expected_mime(&extension)
    {
        let expected_primary = mime_primary(expected);
        if mime_primary(mime) != expected_primary {
            return Err(ValidationError::InvalidMimeType {
                name: file.name.clone(),
                mime: mime.to_string(),
                expected_primary: expected_primary.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a batch, returning one result per file in input order.
#[must_use]
pub fn validate_batch(files: &[FileMetadata]) -> Vec<Result<(), ValidationError>> {
    files.iter().map(validate_file).collect()
}
