use crate::config::Config;
use crate::data_fetcher::api::http_client::{build_default_headers, create_http_client_with_timeout};
use crate::data_fetcher::models::Tournament;
use reqwest::Client;
use serde_json::{Value, json};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Credential used by test clients and configs
    pub const API_KEY: &'static str = "test-key";

    /// Creates a valid config pointing at `api_domain` (usually a mock server URI)
    pub fn config(api_domain: &str) -> Config {
        Config {
            api_domain: api_domain.to_string(),
            api_key: Self::API_KEY.to_string(),
            ..Config::default()
        }
    }

    /// Creates an authenticated client with a short timeout
    pub fn client() -> Client {
        Self::client_with_timeout(5)
    }

    /// Creates an authenticated client with the given timeout in seconds
    pub fn client_with_timeout(timeout_seconds: u64) -> Client {
        let headers = build_default_headers(Self::API_KEY).expect("test API key is a valid header");
        create_http_client_with_timeout(headers, timeout_seconds)
            .expect("Failed to create test HTTP client")
    }

    /// Creates a tournament with a name attribute
    pub fn tournament(id: &str) -> Tournament {
        Tournament::from_value(json!({
            "id": id,
            "name": format!("Tournament {id}"),
            "game": "VGC",
            "format": "vgc23",
            "players": 64
        }))
        .expect("test tournament has a string id")
    }

    /// Creates one tournament per id
    pub fn tournaments(ids: &[&str]) -> Vec<Tournament> {
        ids.iter().map(|id| Self::tournament(id)).collect()
    }

    /// Listing payload as the tournaments endpoint returns it
    pub fn tournament_listing(ids: &[&str]) -> Value {
        Value::Array(
            ids.iter()
                .map(|id| {
                    json!({
                        "id": id,
                        "name": format!("Tournament {id}"),
                        "game": "VGC",
                        "format": "vgc23",
                        "players": 64
                    })
                })
                .collect(),
        )
    }

    /// Standings payload with `players` ranked entries
    pub fn standings(players: usize) -> Value {
        Value::Array(
            (1..=players)
                .map(|placing| {
                    json!({
                        "name": format!("Player {placing}"),
                        "placing": placing,
                        "record": {"wins": 8 - placing.min(8), "losses": placing.min(8), "ties": 0}
                    })
                })
                .collect(),
        )
    }
}
