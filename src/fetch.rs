//! HTTP fetching for source listing pages.
//!
//! One bounded-timeout GET per source, no retries. Connection errors,
//! timeouts, and non-2xx statuses all collapse into a single [`FetchError`]
//! carrying the underlying cause; the driver treats any of them as "zero
//! chapters this run" for the affected source.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A failed page fetch: network error, timeout, or non-success status.
#[derive(Debug, Error)]
#[error("failed to fetch {url}: {source}")]
pub struct FetchError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// Build the shared HTTP client with the per-request timeout applied.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Fetch a listing page and return its body text.
///
/// Any 2xx response succeeds; everything else is a [`FetchError`]. The
/// caller performs no retry.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let wrap = |source: reqwest::Error| FetchError {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(wrap)?;
    let response = response.error_for_status().map_err(wrap)?;
    let body = response.text().await.map_err(wrap)?;
    debug!(%url, bytes = body.len(), "Fetched listing page");
    Ok(body)
}
