//! HTTP client creation and configuration utilities

use crate::config::Config;
use crate::constants::{ACCESS_KEY_HEADER, HTTP_POOL_MAX_IDLE_PER_HOST};
use crate::error::AppError;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// Creates the authenticated client used for every API request.
///
/// `Content-Type: application/json` and the access key header are installed as
/// default headers, so callers only supply URLs. The client is cheap to clone
/// and shares one connection pool across the fan-out tasks.
pub fn create_api_client(config: &Config) -> Result<Client, AppError> {
    let headers = build_default_headers(&config.api_key)?;
    create_http_client_with_timeout(headers, config.http_timeout_seconds)
}

/// Builds the header map sent with every request.
pub fn build_default_headers(api_key: &str) -> Result<HeaderMap, AppError> {
    let mut access_key = HeaderValue::from_str(api_key).map_err(|e| {
        AppError::config_error(format!("API key is not a valid header value: {e}"))
    })?;
    access_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(HeaderName::from_static(ACCESS_KEY_HEADER), access_key);
    Ok(headers)
}

/// Creates an HTTP client with connection pooling and a per-request timeout.
pub fn create_http_client_with_timeout(
    headers: HeaderMap,
    timeout_seconds: u64,
) -> Result<Client, AppError> {
    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()?;
    Ok(client)
}
