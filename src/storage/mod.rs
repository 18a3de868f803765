//! Object storage collaborator boundary.
//!
//! The upload flow depends on [`ObjectStore`] rather than a concrete
//! client so tests can substitute a fake and the storage backend stays
//! swappable. The shipped implementation is [`HttpObjectStore`].

mod error;
mod http;

use async_trait::async_trait;

pub use error::StorageError;
pub use http::HttpObjectStore;

/// Contract for the external object storage service.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads an object and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Request`] for transport failures and
    /// [`StorageError::Rejected`] when the service refuses the object
    /// (opaque message, classified downstream by substring).
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Returns the public URL an uploaded object would be served from.
    fn public_url(&self, key: &str) -> String;
}
