//! Single-request executor: one GET, full body, JSON decode, typed failure.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;
use tracing::{debug, instrument};

use crate::error::AppError;

/// Fetches `url` and decodes the body into `T`.
///
/// The client's default headers supply content type and credential. There is
/// no retry here: every failure is returned as is, and only logged at debug
/// level since the caller records it.
///
/// # Errors
/// * transport: `NetworkTimeout`, `NetworkConnection`, `ApiRequest`
/// * non-2xx status: see [`AppError::from_status`]
/// * decode: `ApiNoData`, `ApiMalformedJson`, `ApiUnexpectedStructure`
#[instrument(skip(client))]
pub async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    debug!("Fetching data from URL: {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| request_error(url, e))?;

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        debug!("HTTP {} - {} (URL: {})", status_code, reason, url);
        return Err(AppError::from_status(status_code, reason, url));
    }

    let response_text = response.text().await.map_err(|e| {
        debug!("Failed to read response text from URL {}: {}", url, e);
        request_error(url, e)
    })?;

    debug!("Response length: {} bytes", response_text.len());

    decode_body(&response_text, url)
}

/// Fetches `url` as an untyped JSON value.
pub async fn fetch_json(client: &Client, url: &str) -> Result<Value, AppError> {
    fetch::<Value>(client, url).await
}

/// Decodes a response body, separating empty, non-JSON and wrongly shaped payloads.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, AppError> {
    if body.trim().is_empty() {
        debug!("Empty response body (URL: {})", url);
        return Err(AppError::api_no_data("Response body is empty", url));
    }

    serde_json::from_str::<T>(body).map_err(|e| {
        debug!("Failed to parse API response: {} (URL: {})", e, url);
        debug!(
            "Response text (first 200 chars): {}",
            body.chars().take(200).collect::<String>()
        );
        match e.classify() {
            Category::Data => AppError::api_unexpected_structure(e.to_string(), url),
            Category::Syntax | Category::Eof | Category::Io => {
                AppError::api_malformed_json(e.to_string(), url)
            }
        }
    })
}

fn request_error(url: &str, e: reqwest::Error) -> AppError {
    debug!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::api_request(url, e.to_string())
    }
}
