pub mod api;
pub mod models;

pub use api::{aggregate_standings, list_games, list_tournaments};
pub use models::{AggregateResult, FetchOutcome, Game, Standings, Tournament};
