//! Transfer-error taxonomy for the upload flow.
//!
//! The storage collaborator exposes no structured error codes, so
//! remote failures are classified by message substring. Brittle by
//! design; revisit if the service ever grows typed errors.

use thiserror::Error;

use crate::storage::StorageError;

use super::validation::ValidationError;

/// Errors for a single file transfer or the batch as a whole.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No response within the timeout bound. The transfer is abandoned,
    /// not cancelled.
    #[error(
        "upload of {name} timed out after {timeout_secs}s\n  Suggestion: Reduce the file size or check your connection and retry"
    )]
    Timeout {
        /// The file that timed out.
        name: String,
        /// The configured bound, in seconds.
        timeout_secs: u64,
    },

    /// The storage service reported a name collision.
    #[error("upload of {name} failed: an object with this name already exists")]
    DuplicateName {
        /// The file that collided.
        name: String,
        /// The remote message that matched.
        message: String,
    },

    /// The storage service refused the write on policy grounds.
    #[error("upload of {name} was denied by the storage access policy")]
    PermissionDenied {
        /// The file that was denied.
        name: String,
        /// The remote message that matched.
        message: String,
    },

    /// Any other storage-layer failure.
    #[error("upload of {name} failed: {message}")]
    Failed {
        /// The file that failed.
        name: String,
        /// Remote or transport error text.
        message: String,
    },

    /// Every file in a non-empty batch was rejected; nothing to insert.
    #[error(
        "all {attempted} file(s) failed to upload; no resources were added\n  Suggestion: Review the per-file errors above and retry"
    )]
    AllFilesRejected {
        /// Number of files in the input batch.
        attempted: usize,
    },
}

impl UploadError {
    /// Creates a timeout error.
    pub fn timeout(name: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            name: name.into(),
            timeout_secs,
        }
    }
}

/// Classifies a storage-layer failure for one file.
///
/// Matching is substring-based on the remote message (the only signal
/// the service provides): "duplicate" means a name collision, "policy"
/// means an access-policy denial, anything else is generic.
#[must_use]
pub fn classify_storage_error(name: &str, error: &StorageError) -> UploadError {
    let Some(message) = error.remote_message() else {
        return UploadError::Failed {
            name: name.to_string(),
            message: error.to_string(),
        };
    };

    let lowered = message.to_lowercase();
    if lowered.contains("duplicate") {
        UploadError::DuplicateName {
            name: name.to_string(),
            message: message.to_string(),
        }
    } else if lowered.contains("policy") {
        UploadError::PermissionDenied {
            name: name.to_string(),
            message: message.to_string(),
        }
    } else {
        UploadError::Failed {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

/// Why one file of a batch was rejected: before the network (validation)
/// or during transfer.
#[derive(Debug, Error)]
pub enum FileRejection {
    /// Failed pre-flight validation; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failed during transfer to the storage service.
    #[error(transparent)]
    Transfer(#[from] UploadError),
}
