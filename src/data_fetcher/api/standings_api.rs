// Standings fan-out: one task per tournament, joined and merged into an AggregateResult.
//
// Tasks never touch shared state. Each returns its own (id, outcome) through
// its join handle; the coordinating call waits for all handles and only then
// merges them one by one.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::fetch_json;
use super::urls::build_standings_url;
use crate::config::Config;
use crate::data_fetcher::models::{
    AggregateResult, FetchOutcome, FetchTask, Standings, Tournament, json_type_name,
};
use crate::error::AppError;

/// Fetches the standings of a single tournament.
///
/// # Errors
/// Executor errors are returned unchanged. A body that is not an array of
/// objects yields `AppError::ApiUnexpectedStructure`. An empty array is a
/// successful, empty result.
#[instrument(skip(client, config))]
pub async fn fetch_standings(
    client: &Client,
    config: &Config,
    tournament_id: &str,
) -> Result<Standings, AppError> {
    let url = build_standings_url(&config.api_domain, tournament_id)?;
    let value = fetch_json(client, &url).await?;

    let Value::Array(records) = value else {
        return Err(AppError::api_unexpected_structure(
            format!(
                "expected an array of standings, got {}",
                json_type_name(&value)
            ),
            url,
        ));
    };

    if let Some(bad) = records.iter().find(|record| !record.is_object()) {
        return Err(AppError::api_unexpected_structure(
            format!("standings entry is {}, expected object", json_type_name(bad)),
            url,
        ));
    }

    debug!(
        "Fetched {} standings entries for tournament {}",
        records.len(),
        tournament_id
    );
    Ok(records)
}

/// Fetches standings for every tournament concurrently and merges the results.
///
/// One task is spawned per tournament. With `config.max_concurrency` unset
/// every request is in flight at once; with `Some(n)` at most `n` are.
///
/// The returned aggregate holds exactly one entry per distinct tournament id,
/// `Succeeded` or `Failed`. A failing fetch never affects its siblings and
/// never fails the call. Tournament ids are expected to be unique (the lister
/// guarantees it); for a repeated id only the first outcome is kept.
#[instrument(skip_all, fields(tournaments = tournaments.len()))]
pub async fn aggregate_standings(
    client: &Client,
    config: &Config,
    tournaments: &[Tournament],
) -> AggregateResult {
    if tournaments.is_empty() {
        info!("No tournaments to fetch standings for");
        return AggregateResult::new();
    }

    match config.max_concurrency {
        Some(limit) => info!(
            "Fetching standings for {} tournaments (at most {} at a time)",
            tournaments.len(),
            limit
        ),
        None => info!(
            "Fetching standings for {} tournaments concurrently",
            tournaments.len()
        ),
    }

    let config = Arc::new(config.clone());
    let limiter = config
        .max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.min(Semaphore::MAX_PERMITS))));

    let handles: Vec<(String, JoinHandle<(String, FetchOutcome)>)> = tournaments
        .iter()
        .map(|tournament| {
            let task = FetchTask::new(tournament.id.clone());
            let handle = tokio::spawn(run_task(
                task,
                client.clone(),
                Arc::clone(&config),
                limiter.clone(),
            ));
            (tournament.id.clone(), handle)
        })
        .collect();

    let aggregate = collect_outcomes(handles).await;

    let summary = aggregate.summary();
    info!(
        "Standings fetch completed: {} successful, {} failed",
        summary.succeeded, summary.failed
    );

    aggregate
}

/// Waits for every handle, then merges their outputs.
///
/// A task that panicked or was cancelled is recorded as
/// `Failed(TaskAborted)` under the id it was spawned for, so every handle
/// yields exactly one entry.
pub async fn collect_outcomes(
    handles: Vec<(String, JoinHandle<(String, FetchOutcome)>)>,
) -> AggregateResult {
    // Completion barrier: every task has reached a terminal state past this point.
    let joined = join_all(
        handles
            .into_iter()
            .map(|(id, handle)| async move { (id, handle.await) }),
    )
    .await;

    let outputs = joined.into_iter().map(|(id, joined)| match joined {
        Ok((_, outcome)) => (id, outcome),
        Err(join_error) => {
            warn!("Standings task for {} did not complete: {}", id, join_error);
            let error = AppError::task_aborted(&id, join_error.to_string());
            (id, FetchOutcome::Failed { error })
        }
    });

    merge_outcomes(outputs)
}

/// Merges task outputs into an aggregate, sequentially and without overwriting.
///
/// Given the same outputs it always produces the same aggregate, regardless of
/// the order in which the tasks finished.
pub fn merge_outcomes<I>(outputs: I) -> AggregateResult
where
    I: IntoIterator<Item = (String, FetchOutcome)>,
{
    let mut aggregate = AggregateResult::new();
    for (id, outcome) in outputs {
        aggregate.insert(id, outcome);
    }
    aggregate
}

async fn run_task(
    mut task: FetchTask,
    client: Client,
    config: Arc<Config>,
    limiter: Option<Arc<Semaphore>>,
) -> (String, FetchOutcome) {
    // Held until the fetch finishes; `None` when dispatch is unbounded.
    let _permit = match limiter {
        Some(semaphore) => match semaphore.acquire_owned().await {
            Ok(permit) => Some(permit),
            Err(e) => {
                let error = AppError::task_aborted(task.id(), e.to_string());
                return task.complete(FetchOutcome::Failed { error });
            }
        },
        None => None,
    };

    task.start();
    let result = fetch_standings(&client, &config, task.id()).await;
    if let Err(e) = &result {
        warn!("Failed to fetch standings for tournament {}: {}", task.id(), e);
    }
    task.complete(FetchOutcome::from(result))
}
