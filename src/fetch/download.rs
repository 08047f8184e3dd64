// src/fetch/download.rs
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::FetchError;

/// HTTP client whose requests give up after `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| FetchError::Http {
            url: String::new(),
            source,
        })
}

/// GET `url` and return the body.
pub async fn download_bytes(client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    let http = |source: reqwest::Error| FetchError::Http {
        url: url.to_string(),
        source,
    };
    let resp = client
        .get(url.as_str())
        .send()
        .await
        .map_err(http)?
        .error_for_status()
        .map_err(http)?;
    let bytes = resp.bytes().await.map_err(http)?;
    Ok(bytes.to_vec())
}
