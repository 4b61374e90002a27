//! Step count sources.
//!
//! A source answers one question: how many steps since local midnight.
//! On a phone that is the health-data store; here it is a file another
//! process keeps up to date, or a mock in tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use super::error::StepSourceError;

/// Cumulative step count provider.
#[allow(async_fn_in_trait)]
pub trait StepSource {
    /// Returns the cumulative step count since local midnight.
    async fn steps_since_midnight(&self) -> Result<f64, StepSourceError>;
}

/// Reads the step count from a file.
///
/// Accepted contents: a bare JSON number (`8421`), an object with a
/// `steps` field (`{"steps": 8421}`), or `null`/empty for "no data yet".
#[derive(Debug, Clone)]
pub struct FileStepSource {
    path: PathBuf,
}

impl FileStepSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StepSource for FileStepSource {
    async fn steps_since_midnight(&self) -> Result<f64, StepSourceError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StepSourceError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        debug!("Read step file {}", self.path.display());
        parse_step_count(&contents)
    }
}

/// Parses the step file format described on [`FileStepSource`].
pub fn parse_step_count(contents: &str) -> Result<f64, StepSourceError> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Err(StepSourceError::NoData);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| StepSourceError::InvalidData(e.to_string()))?;
    let count = match &value {
        Value::Null => return Err(StepSourceError::NoData),
        Value::Object(map) => match map.get("steps") {
            None | Some(Value::Null) => return Err(StepSourceError::NoData),
            Some(steps) => steps.as_f64(),
        },
        other => other.as_f64(),
    };

    match count {
        Some(steps) if steps >= 0.0 && steps.is_finite() => Ok(steps),
        _ => Err(StepSourceError::InvalidData(trimmed.to_string())),
    }
}

/// Source that replays scripted answers, for tests.
///
/// Once the script runs out every query returns `NoData`.
#[derive(Debug, Default)]
pub struct MockStepSource {
    responses: Mutex<VecDeque<Result<f64, StepSourceError>>>,
    calls: AtomicUsize,
}

impl MockStepSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an answer.
    pub fn push(&self, response: Result<f64, StepSourceError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StepSource for MockStepSource {
    async fn steps_since_midnight(&self) -> Result<f64, StepSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(StepSourceError::NoData))
    }
}
