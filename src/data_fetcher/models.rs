//! Data shapes for tournaments, their standings and the merged fan-out result.

use crate::error::{AppError, ErrorKind};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, warn};

/// A tournament as returned by the listing endpoint.
///
/// Only `id` is interpreted; every other key is kept verbatim in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Tournament {
    /// Builds a tournament from one record of the listing.
    ///
    /// Fails with [`AppError::ResourceShape`] when the record is not an object or
    /// its `id` is missing or not a string.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let Value::Object(mut attributes) = value else {
            return Err(AppError::resource_shape(format!(
                "expected an object, got {}",
                json_type_name(&value)
            )));
        };

        let id = match attributes.remove("id") {
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(AppError::resource_shape(format!(
                    "tournament id is not a string: {other}"
                )));
            }
            None => return Err(AppError::resource_shape("tournament record has no id")),
        };

        Ok(Tournament { id, attributes })
    }

    /// Display name, when the API provides one.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }
}

/// Standings of a single tournament: an ordered list of untyped records.
pub type Standings = Vec<Value>;

/// Terminal result of one standings fetch.
///
/// `Succeeded` with an empty list means the tournament has no standings; it is
/// never used to stand in for a failure.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    Succeeded {
        standings: Standings,
    },
    Failed {
        #[serde(serialize_with = "serialize_error")]
        error: AppError,
    },
}

fn serialize_error<S: Serializer>(error: &AppError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Succeeded { .. })
    }

    pub fn standings(&self) -> Option<&Standings> {
        match self {
            FetchOutcome::Succeeded { standings } => Some(standings),
            FetchOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            FetchOutcome::Succeeded { .. } => None,
            FetchOutcome::Failed { error } => Some(error),
        }
    }
}

impl From<Result<Standings, AppError>> for FetchOutcome {
    fn from(result: Result<Standings, AppError>) -> Self {
        match result {
            Ok(standings) => FetchOutcome::Succeeded { standings },
            Err(error) => FetchOutcome::Failed { error },
        }
    }
}

/// Lifecycle of a [`FetchTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

/// One unit of fan-out work: a tournament id and where its fetch stands.
///
/// Consumed by [`FetchTask::complete`], which yields the entry to merge.
#[derive(Debug)]
pub struct FetchTask {
    id: String,
    state: TaskState,
}

impl FetchTask {
    pub fn new(id: impl Into<String>) -> Self {
        FetchTask {
            id: id.into(),
            state: TaskState::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `Pending -> InFlight`. Calling it again is a no-op.
    pub fn start(&mut self) {
        if self.state == TaskState::Pending {
            self.state = TaskState::InFlight;
            debug!("Standings task {} in flight", self.id);
        }
    }

    /// Moves the task to its terminal state and hands back the mergeable entry.
    pub fn complete(mut self, outcome: FetchOutcome) -> (String, FetchOutcome) {
        self.state = if outcome.is_success() {
            TaskState::Succeeded
        } else {
            TaskState::Failed
        };
        debug!("Standings task {} finished as {:?}", self.id, self.state);
        (self.id, outcome)
    }
}

/// Standings keyed by tournament id, one entry per listed tournament.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct AggregateResult {
    entries: BTreeMap<String, FetchOutcome>,
}

/// Success/failure counts of an [`AggregateResult`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub transport_failures: usize,
    pub status_failures: usize,
    pub decode_failures: usize,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for `id`. An existing entry is never replaced;
    /// returns `false` when `id` was already present.
    pub fn insert(&mut self, id: String, outcome: FetchOutcome) -> bool {
        match self.entries.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
            Entry::Occupied(slot) => {
                warn!(
                    "Ignoring second outcome for tournament {}; first one is kept",
                    slot.key()
                );
                false
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&FetchOutcome> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&String, &AppError)> {
        self.entries
            .iter()
            .filter_map(|(id, outcome)| outcome.error().map(|e| (id, e)))
    }

    pub fn summary(&self) -> AggregateSummary {
        let mut summary = AggregateSummary::default();
        for outcome in self.entries.values() {
            match outcome {
                FetchOutcome::Succeeded { .. } => summary.succeeded += 1,
                FetchOutcome::Failed { error } => {
                    summary.failed += 1;
                    match error.kind() {
                        ErrorKind::Transport => summary.transport_failures += 1,
                        ErrorKind::HttpStatus => summary.status_failures += 1,
                        ErrorKind::Decode => summary.decode_failures += 1,
                        _ => {}
                    }
                }
            }
        }
        summary
    }
}

/// A game (format family) as listed by `/games`. Kept untyped apart from `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
