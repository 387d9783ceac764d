use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SourceError;

/// GET a JSON document, mapping transport, status, and decode failures onto
/// the source error taxonomy.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, SourceError> {
    debug!(url, "catalog request");
    let response = client.get(url).send().await.map_err(SourceError::Network)?;
    if !response.status().is_success() {
        return Err(SourceError::BadStatus(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::Parse(e.to_string()))
}

/// Like `get_json`, but a 404 is a well-formed "no such record" answer
/// rather than an error.
pub(crate) async fn get_json_opt<T: DeserializeOwned>(
    client: &Client,
    url: &str,
) -> Result<Option<T>, SourceError> {
    debug!(url, "catalog request");
    let response = client.get(url).send().await.map_err(SourceError::Network)?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(SourceError::BadStatus(response.status()));
    }
    response
        .json::<T>()
        .await
        .map(Some)
        .map_err(|e| SourceError::Parse(e.to_string()))
}
