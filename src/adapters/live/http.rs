//! Shared HTTP plumbing for the live backend adapters.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::BackendError;

/// Characters left unescaped in a path segment; everything else, `/` included, is encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a store path so it fits in a single URL segment.
#[must_use]
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

/// Error body the backend sends with non-success responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendHttp {
    client: Client,
    base_url: String,
}

impl BackendHttp {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Absolute URL for an endpoint path such as `/models`.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Absolute URL for one file in the store.
    #[must_use]
    pub fn file_url(&self, path: &str) -> String {
        format!("{}/files/{}", self.base_url, encode_path(path))
    }

    /// The underlying reqwest client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sends a request and decodes a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if no response arrives, `Rejected` on a non-success
    /// status and `Malformed` if the body does not decode as `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let text = self.send(request).await?;
        serde_json::from_str(&text)
            .map_err(|e| BackendError::Malformed(format!("Failed to parse backend response: {e}")))
    }

    /// Sends a request whose response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if no response arrives and `Rejected` on a
    /// non-success status.
    pub async fn send_unit(&self, request: RequestBuilder) -> Result<(), BackendError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("Backend request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(format!("Failed to read backend response: {e}")))?;

        if !status.is_success() {
            let detail =
                serde_json::from_str::<ErrorBody>(&text).map(|body| body.detail).unwrap_or(text);
            tracing::debug!(status = status.as_u16(), %detail, "backend rejected request");
            return Err(BackendError::Rejected { status: status.as_u16(), detail });
        }

        Ok(text)
    }
}
