// Tournament listing: one bulk request, validated into typed tournaments.

use std::collections::HashSet;

use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument};

use super::fetch_utils::fetch_json;
use super::urls::build_tournaments_url;
use crate::config::Config;
use crate::constants::UNBOUNDED_LIST_LIMIT;
use crate::data_fetcher::models::{Tournament, json_type_name};
use crate::error::AppError;

/// Lists every tournament of `format` in a single request.
///
/// The request asks for `limit=u64::MAX`, so no paging is involved.
///
/// # Errors
/// Any executor error is returned unchanged. The body must be an array of
/// objects, each with a unique string `id`; otherwise
/// `AppError::ApiUnexpectedStructure` is returned.
#[instrument(skip(client, config))]
pub async fn list_tournaments(
    client: &Client,
    config: &Config,
    format: &str,
) -> Result<Vec<Tournament>, AppError> {
    let url = build_tournaments_url(&config.api_domain, format, UNBOUNDED_LIST_LIMIT)?;
    info!("Listing tournaments for format {format}");

    let value = fetch_json(client, &url).await?;
    let tournaments = parse_tournament_list(value, &url)?;

    info!("Found {} tournaments for format {}", tournaments.len(), format);
    Ok(tournaments)
}

/// Turns the listing payload into tournaments.
pub fn parse_tournament_list(value: Value, url: &str) -> Result<Vec<Tournament>, AppError> {
    let Value::Array(records) = value else {
        return Err(AppError::api_unexpected_structure(
            format!(
                "expected an array of tournaments, got {}",
                json_type_name(&value)
            ),
            url,
        ));
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut tournaments = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let tournament = Tournament::from_value(record).map_err(|e| {
            AppError::api_unexpected_structure(format!("record #{index}: {e}"), url)
        })?;

        if !seen.insert(tournament.id.clone()) {
            return Err(AppError::api_unexpected_structure(
                format!("record #{index}: duplicate tournament id {}", tournament.id),
                url,
            ));
        }
        tournaments.push(tournament);
    }

    Ok(tournaments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing_utils::TestDataBuilder;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    #[tokio::test]
    async fn test_list_tournaments_success() {
        let mock_server = MockServer::start().await;
        let config = TestDataBuilder::config(&mock_server.uri());
        let client = TestDataBuilder::client();

        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .and(query_param("format", "vgc23"))
            .and(query_param("limit", u64::MAX.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestDataBuilder::tournament_listing(&["T1", "T2", "T3"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let tournaments = list_tournaments(&client, &config, "vgc23").await.unwrap();

        let ids: Vec<&str> = tournaments.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
        assert_eq!(tournaments[0].name(), Some("Tournament T1"));
    }

    #[tokio::test]
    async fn test_list_tournaments_empty() {
        let mock_server = MockServer::start().await;
        let config = TestDataBuilder::config(&mock_server.uri());
        let client = TestDataBuilder::client();

        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let tournaments = list_tournaments(&client, &config, "vgc23").await.unwrap();
        assert!(tournaments.is_empty());
    }

    #[tokio::test]
    async fn test_list_tournaments_status_error_is_returned() {
        let mock_server = MockServer::start().await;
        let config = TestDataBuilder::config(&mock_server.uri());
        let client = TestDataBuilder::client();

        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;

        let error = list_tournaments(&client, &config, "vgc23")
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::ApiClientError { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_list_tournaments_format_is_a_single_query_value() {
        let mock_server = MockServer::start().await;
        let config = TestDataBuilder::config(&mock_server.uri());
        let client = TestDataBuilder::client();

        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .and(query_param("format", "vgc23&limit=1"))
            .and(query_param("limit", u64::MAX.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestDataBuilder::tournament_listing(&["T1"])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let tournaments = list_tournaments(&client, &config, "vgc23&limit=1")
            .await
            .unwrap();
        assert_eq!(tournaments.len(), 1);
    }

    #[test]
    fn test_bad_records_are_decode_errors_not_shape_errors() {
        let listings = [
            json!([{"name": "anonymous"}]),
            json!([{"id": 42}]),
            json!([7]),
            json!([{"id": "T1"}, {"id": "T1"}]),
        ];
        for listing in listings {
            let error = parse_tournament_list(listing.clone(), "https://x").unwrap_err();
            assert!(
                matches!(error, AppError::ApiUnexpectedStructure { .. }),
                "{listing}: {error:?}"
            );
            assert_eq!(error.kind(), ErrorKind::Decode, "{listing}");
        }
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let result = parse_tournament_list(json!({"error": "nope"}), "https://x");
        match result {
            Err(AppError::ApiUnexpectedStructure { message, .. }) => {
                assert!(message.contains("object"));
            }
            other => panic!("expected unexpected structure, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_record_without_id() {
        let result = parse_tournament_list(
            json!([{"id": "T1"}, {"name": "anonymous"}]),
            "https://x",
        );
        match result {
            Err(AppError::ApiUnexpectedStructure { message, .. }) => {
                assert!(message.contains("record #1"), "{message}");
            }
            other => panic!("expected unexpected structure, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_object_record() {
        let result = parse_tournament_list(json!(["T1"]), "https://x");
        assert!(matches!(
            result,
            Err(AppError::ApiUnexpectedStructure { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let result = parse_tournament_list(json!([{"id": "T1"}, {"id": "T1"}]), "https://x");
        match result {
            Err(AppError::ApiUnexpectedStructure { message, .. }) => {
                assert!(message.contains("duplicate"), "{message}");
            }
            other => panic!("expected unexpected structure, got {other:?}"),
        }
    }
}
