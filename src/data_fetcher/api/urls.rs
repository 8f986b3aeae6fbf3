//! URL building utilities for API endpoints
//!
//! Path segments and query values are percent-encoded, so a tournament id or
//! format can never address a different endpoint than the one asked for.

use reqwest::Url;

use crate::error::AppError;

/// Parses the configured domain. A domain without a scheme is taken as https.
fn base_url(api_domain: &str) -> Result<Url, AppError> {
    let trimmed = api_domain.trim_end_matches('/');
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate)
        .map_err(|e| AppError::config_error(format!("Invalid API domain '{api_domain}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AppError::config_error(format!(
            "API domain '{api_domain}' cannot carry a path"
        )));
    }
    Ok(url)
}

fn with_segments(api_domain: &str, segments: &[&str]) -> Result<Url, AppError> {
    let mut url = base_url(api_domain)?;
    url.path_segments_mut()
        .map_err(|_| AppError::config_error(format!("API domain '{api_domain}' cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Builds the tournament listing URL for a format.
///
/// # Example
/// ```
/// use limitless_standings::data_fetcher::api::build_tournaments_url;
///
/// let url = build_tournaments_url("https://api.example.com", "vgc23", 50).unwrap();
/// assert_eq!(url, "https://api.example.com/tournaments?format=vgc23&limit=50");
/// ```
pub fn build_tournaments_url(
    api_domain: &str,
    format: &str,
    limit: u64,
) -> Result<String, AppError> {
    let mut url = with_segments(api_domain, &["tournaments"])?;
    url.query_pairs_mut()
        .append_pair("format", format)
        .append_pair("limit", &limit.to_string());
    Ok(url.into())
}

/// Builds the standings URL of one tournament.
///
/// # Example
/// ```
/// use limitless_standings::data_fetcher::api::build_standings_url;
///
/// let url = build_standings_url("https://api.example.com/", "63f9a1").unwrap();
/// assert_eq!(url, "https://api.example.com/tournaments/63f9a1/standings");
/// ```
pub fn build_standings_url(api_domain: &str, tournament_id: &str) -> Result<String, AppError> {
    Ok(with_segments(api_domain, &["tournaments", tournament_id, "standings"])?.into())
}

/// Builds the URL listing every game the API knows about.
///
/// # Example
/// ```
/// use limitless_standings::data_fetcher::api::build_games_url;
///
/// assert_eq!(
///     build_games_url("https://api.example.com").unwrap(),
///     "https://api.example.com/games"
/// );
/// ```
pub fn build_games_url(api_domain: &str) -> Result<String, AppError> {
    Ok(with_segments(api_domain, &["games"])?.into())
}
