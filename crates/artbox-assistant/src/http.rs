//! Shared reqwest plumbing for the catalog and chat clients.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::FetchError;

/// Check the status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), url, body = %body, "request failed");
        return Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
}

/// Build the shared HTTP client.
pub(crate) fn client(timeout: std::time::Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FetchError::from)
}
