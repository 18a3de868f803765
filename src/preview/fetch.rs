//! Text body retrieval for text previews.
//!
//! Only [`PreviewKind::Text`](super::PreviewKind::Text) resources need
//! a network round-trip before rendering; everything else embeds by
//! URL. Dropping the returned future cancels the request, so a closed
//! preview never leaves a transfer running.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument};

/// Bound on one text-body fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from fetching a text preview body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure before any response arrived.
    #[error("failed to fetch text preview from {url}\n  Suggestion: Check your network connection and retry")]
    Request {
        /// The URL that failed.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("text preview fetch from {url} returned HTTP {status}")]
    Status {
        /// The URL that failed.
        url: String,
        /// The status code returned.
        status: u16,
    },
}

/// Fetches text bodies for preview rendering.
pub struct TextFetcher {
    client: reqwest::Client,
}

impl TextFetcher {
    /// Creates a fetcher with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetches the body at `url` and decodes it as UTF-8, replacing
    /// invalid sequences rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] for transport failures and
    /// [`FetchError::Status`] for non-success responses.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(len = bytes.len(), "fetched text preview body");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for TextFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/solver.py"))
            .respond_with(ResponseTemplate::new(200).set_body_string("print('hi')"))
            .mount(&server)
            .await;

        let fetcher = TextFetcher::new();
        let body = fetcher
            .fetch(&format!("{}/solver.py", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "print('hi')");
    }

    #[tokio::test]
    async fn test_fetch_lossy_decodes_invalid_utf8() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x68, 0x69, 0xFF]))
            .mount(&server)
            .await;

        let fetcher = TextFetcher::new();
        let body = fetcher
            .fetch(&format!("{}/raw.txt", server.uri()))
            .await
            .unwrap();
        assert!(body.starts_with("hi"));
        assert!(body.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = TextFetcher::new();
        let err = fetcher
            .fetch(&format!("{}/gone.txt", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_is_a_request_error() {
        let fetcher = TextFetcher::new();
        let err = fetcher
            .fetch("http://127.0.0.1:1/unreachable.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
