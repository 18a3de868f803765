//! Error types for object storage operations.

use thiserror::Error;

/// Errors surfaced by the object storage collaborator.
///
/// The storage service exposes no structured error codes; remote
/// rejections carry only an opaque message string, which the upload
/// layer classifies by substring.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The HTTP request itself failed (DNS, connection, TLS).
    #[error("storage request failed for {key}: {source}")]
    Request {
        /// Storage key of the attempted upload.
        key: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The storage service rejected the upload.
    #[error("storage rejected {key}: {message}")]
    Rejected {
        /// Storage key of the attempted upload.
        key: String,
        /// Opaque remote error message.
        message: String,
    },
}

impl StorageError {
    /// Creates a transport error.
    pub fn request(key: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            key: key.into(),
            source,
        }
    }

    /// Creates a remote-rejection error.
    pub fn rejected(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns the remote rejection message, when present.
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            Self::Request { .. } => None,
        }
    }
}
