//! HTTP-backed object store speaking the managed storage service's
//! simple object surface.
//!
//! Uploads go to `POST {base}/object/{bucket}/{key}`; public URLs live
//! under `{base}/object/public/{bucket}/{key}`. No versioning and no
//! resumable uploads are assumed.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::error::StorageError;
use super::ObjectStore;

/// Connect timeout for storage requests.
///
/// No overall request timeout is set here: the upload coordinator races
/// each upload against its own deadline.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Object store client over the storage service's HTTP surface.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl HttpObjectStore {
    /// Creates a client for one bucket of the storage service.
    ///
    /// Trailing slashes on `base_url` are trimmed so key paths join
    /// cleanly.
    #[must_use]
    pub fn new(base_url: &str, bucket: &str) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    #[instrument(skip(self, bytes), fields(key, bytes = bytes.len()))]
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        let mut request = self.client.post(self.object_url(key)).body(bytes);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::request(key, e))?;

        let status = response.status();
        if status.is_success() {
            debug!(key, "object uploaded");
            return Ok(self.public_url(key));
        }

        // The service reports failures as a plain text/JSON body; keep it
        // opaque and let the caller classify by substring.
        let message = match response.text().await {
            Ok(body) if !body.is_empty() => body,
            _ => format!("HTTP {status}"),
        };
        Err(StorageError::rejected(key, message))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, key)
    }
}
