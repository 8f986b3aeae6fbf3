use crate::config::Config;
use crate::data_fetcher::api::{aggregate_standings, create_api_client, list_games, list_tournaments};
use crate::data_fetcher::models::AggregateResult;
use crate::error::AppError;
use reqwest::Client;
use std::io::{Write, stdout};
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

/// What one `tours` run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Number of tournaments the listing returned
    pub listed: usize,
    /// Standings keyed by tournament id, one entry per listed tournament
    pub aggregate: AggregateResult,
    /// Wall-clock time of listing plus fan-out
    pub elapsed: Duration,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.aggregate.summary().failed > 0
    }
}

/// Lists the tournaments of `format`, then fetches all their standings.
///
/// Only a failed listing is an error; standings failures are recorded in the
/// aggregate.
#[instrument(skip(client, config))]
pub async fn fetch_tours(
    client: &Client,
    config: &Config,
    format: &str,
) -> Result<RunReport, AppError> {
    let start = Instant::now();

    let tournaments = list_tournaments(client, config, format)
        .await
        .inspect_err(|e| error!("Failed to list tournaments for {format}: {e}"))?;
    let aggregate = aggregate_standings(client, config, &tournaments).await;
    let elapsed = start.elapsed();

    let summary = aggregate.summary();
    if summary.failed > 0 {
        warn!(
            "{} of {} tournaments have no standings due to errors",
            summary.failed,
            aggregate.len()
        );
    }
    info!(
        "Fetched standings for {} tournaments in {:?}",
        tournaments.len(),
        elapsed
    );

    Ok(RunReport {
        listed: tournaments.len(),
        aggregate,
        elapsed,
    })
}

/// Runs the `tours` mode and prints its report to stdout.
pub async fn run_tours(config: &Config, format: &str) -> Result<RunReport, AppError> {
    let client = create_api_client(config)?;
    let report = fetch_tours(&client, config, format).await?;
    write_report(&mut stdout().lock(), &report)?;
    Ok(report)
}

/// Runs the `formats` mode: prints the games as pretty JSON.
pub async fn run_formats(config: &Config, game: Option<&str>) -> Result<(), AppError> {
    let client = create_api_client(config)?;
    let start = Instant::now();
    let games = list_games(&client, config, game)
        .await
        .inspect_err(|e| error!("Failed to list games: {e}"))?;

    let mut out = stdout().lock();
    for game in &games {
        serde_json::to_writer_pretty(&mut out, game)?;
        writeln!(out)?;
    }
    writeln!(out, "Time taken={:?}", start.elapsed())?;
    Ok(())
}

/// Writes the listing count, the aggregate, a failure summary and the elapsed time.
pub fn write_report<W: Write>(out: &mut W, report: &RunReport) -> Result<(), AppError> {
    writeln!(out, "total_entries={}", report.listed)?;
    serde_json::to_writer_pretty(&mut *out, &report.aggregate)?;
    writeln!(out)?;

    let summary = report.aggregate.summary();
    writeln!(
        out,
        "succeeded={} failed={}",
        summary.succeeded, summary.failed
    )?;
    if summary.failed > 0 {
        let other = summary.failed
            - summary.transport_failures
            - summary.status_failures
            - summary.decode_failures;
        writeln!(
            out,
            "failures: transport={} status={} decode={} other={}",
            summary.transport_failures, summary.status_failures, summary.decode_failures, other
        )?;
    }
    for (id, error) in report.aggregate.failures() {
        writeln!(out, "  {id}: {error}")?;
    }
    writeln!(out, "Time taken={:?}", report.elapsed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::FetchOutcome;
    use crate::testing_utils::TestDataBuilder;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn test_fetch_tours_partial_failure() {
        let mock_server = MockServer::start().await;
        let config = TestDataBuilder::config(&mock_server.uri());
        let client = TestDataBuilder::client();

        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestDataBuilder::tournament_listing(&["T1", "T2"])),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tournaments/T1/standings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"rank": 1}])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tournaments/T2/standings"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let report = fetch_tours(&client, &config, "vgc23").await.unwrap();

        assert_eq!(report.listed, 2);
        assert_eq!(report.aggregate.len(), 2);
        assert!(report.has_failures());
        assert!(report.aggregate.get("T1").is_some_and(FetchOutcome::is_success));
    }

    #[tokio::test]
    async fn test_fetch_tours_listing_failure_is_error() {
        let mock_server = MockServer::start().await;
        let config = TestDataBuilder::config(&mock_server.uri());
        let client = TestDataBuilder::client();

        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 7}]"))
            .mount(&mock_server)
            .await;

        let error = fetch_tours(&client, &config, "vgc23").await.unwrap_err();
        assert!(matches!(error, AppError::ApiUnexpectedStructure { .. }));
    }

    #[test]
    fn test_write_report() {
        let mut aggregate = AggregateResult::new();
        aggregate.insert("T1".into(), FetchOutcome::from(Ok(vec![json!({"rank": 1})])));
        aggregate.insert(
            "T2".into(),
            FetchOutcome::from(Err(AppError::network_timeout("https://x/T2"))),
        );
        let report = RunReport {
            listed: 2,
            aggregate,
            elapsed: Duration::from_millis(1500),
        };

        let mut buffer = Vec::new();
        write_report(&mut buffer, &report).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("total_entries=2\n"));
        assert!(output.contains("\"status\": \"succeeded\""));
        assert!(output.contains("succeeded=1 failed=1"));
        assert!(output.contains("failures: transport=1 status=0 decode=0 other=0"));
        assert!(output.contains("  T2: Network timeout while fetching data from: https://x/T2"));
        assert!(output.trim_end().ends_with("Time taken=1.5s"));
    }

    #[test]
    fn test_write_report_breaks_failures_down_by_kind() {
        let mut aggregate = AggregateResult::new();
        aggregate.insert(
            "A".into(),
            FetchOutcome::from(Err(AppError::api_server_error(500, "boom", "u"))),
        );
        aggregate.insert(
            "B".into(),
            FetchOutcome::from(Err(AppError::api_not_found("u"))),
        );
        aggregate.insert(
            "C".into(),
            FetchOutcome::from(Err(AppError::api_malformed_json("bad", "u"))),
        );
        aggregate.insert(
            "D".into(),
            FetchOutcome::from(Err(AppError::task_aborted("D", "task panicked"))),
        );
        let report = RunReport {
            listed: 4,
            aggregate,
            elapsed: Duration::from_millis(10),
        };

        let mut buffer = Vec::new();
        write_report(&mut buffer, &report).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("succeeded=0 failed=4"));
        assert!(output.contains("failures: transport=0 status=2 decode=1 other=1"));
    }

    #[test]
    fn test_write_report_without_failures_has_no_breakdown() {
        let mut aggregate = AggregateResult::new();
        aggregate.insert("T1".into(), FetchOutcome::from(Ok(vec![])));
        let report = RunReport {
            listed: 1,
            aggregate,
            elapsed: Duration::from_millis(10),
        };

        let mut buffer = Vec::new();
        write_report(&mut buffer, &report).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.contains("succeeded=1 failed=0"));
        assert!(!output.contains("failures:"));
    }
}
