//! Limitless TCG standings fetcher
//!
//! Lists the tournaments of a format from the Limitless TCG API and fetches
//! every tournament's standings concurrently, keeping one entry per
//! tournament whether its fetch succeeded or failed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use limitless_standings::config::Config;
//! use limitless_standings::data_fetcher::api::{aggregate_standings, create_api_client, list_tournaments};
//! use limitless_standings::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     config.validate()?;
//!     let client = create_api_client(&config)?;
//!
//!     let tournaments = list_tournaments(&client, &config, "vgc23").await?;
//!     let standings = aggregate_standings(&client, &config, &tournaments).await;
//!
//!     assert_eq!(standings.len(), tournaments.len());
//!     for (id, error) in standings.failures() {
//!         eprintln!("{id}: {error}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{aggregate_standings, fetch_standings, list_tournaments};
pub use data_fetcher::models::{AggregateResult, FetchOutcome, Standings, Tournament};
pub use error::AppError;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
