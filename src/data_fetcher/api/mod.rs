pub mod fetch_utils;
pub mod game_api;
pub mod http_client;
pub mod standings_api;
pub mod tournament_api;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
pub use fetch_utils::{fetch, fetch_json};
pub use game_api::list_games;
pub use http_client::create_api_client;
pub use standings_api::{aggregate_standings, collect_outcomes, fetch_standings, merge_outcomes};
pub use tournament_api::{list_tournaments, parse_tournament_list};
