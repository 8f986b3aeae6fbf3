// Game listing: the `/games` endpoint, optionally narrowed to a single game id.

use reqwest::Client;
use tracing::{info, instrument};

use super::fetch_utils::fetch;
use super::urls::build_games_url;
use crate::config::Config;
use crate::data_fetcher::models::Game;
use crate::error::AppError;

/// Lists the games the API knows about. With `game_id`, only games whose id
/// matches (case-insensitively) are returned.
#[instrument(skip(client, config))]
pub async fn list_games(
    client: &Client,
    config: &Config,
    game_id: Option<&str>,
) -> Result<Vec<Game>, AppError> {
    let url = build_games_url(&config.api_domain)?;
    let games: Vec<Game> = fetch(client, &url).await?;
    info!("API lists {} games", games.len());

    Ok(match game_id {
        Some(wanted) => games
            .into_iter()
            .filter(|game| game.id.eq_ignore_ascii_case(wanted))
            .collect(),
        None => games,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    async fn mount_games(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "PTCG", "name": "Pokémon TCG", "formats": {"STANDARD": "Standard"}},
                {"id": "VGC", "name": "Pokémon VGC", "formats": {"VGC23": "Scarlet & Violet"}}
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_all_games() {
        let mock_server = MockServer::start().await;
        mount_games(&mock_server).await;
        let config = TestDataBuilder::config(&mock_server.uri());

        let games = list_games(&TestDataBuilder::client(), &config, None)
            .await
            .unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].attributes["name"], json!("Pokémon VGC"));
    }

    #[tokio::test]
    async fn test_list_games_filtered() {
        let mock_server = MockServer::start().await;
        mount_games(&mock_server).await;
        let config = TestDataBuilder::config(&mock_server.uri());

        let games = list_games(&TestDataBuilder::client(), &config, Some("vgc"))
            .await
            .unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "VGC");
    }

    #[tokio::test]
    async fn test_list_games_wrong_shape() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"games": []})))
            .mount(&mock_server)
            .await;
        let config = TestDataBuilder::config(&mock_server.uri());

        let error = list_games(&TestDataBuilder::client(), &config, None)
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::ApiUnexpectedStructure { .. }));
    }
}
