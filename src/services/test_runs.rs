//! Simulated test runs.
//!
//! Starting a run marks the test as running for a fixed duration and then
//! reverts. Nothing is executed and no fixture is changed; the running set
//! is an overlay applied when tests are rendered. Revert timers live on a
//! [`TaskScope`] owned by the tracker.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::error::ErrorCode;
use crate::qa::fixtures;
use crate::scope::TaskScope;

pub const DEFAULT_RUN_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("test not found: {0}")]
    UnknownTest(u32),
}

impl ErrorCode for RunError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTest(_) => "E_TEST_NOT_FOUND",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStart {
    pub id: u32,
    pub running: bool,
    pub already_running: bool,
}

#[derive(Clone)]
pub struct RunTracker {
    running: Arc<Mutex<HashSet<u32>>>,
    scope: Arc<TaskScope>,
    duration: Duration,
}

impl RunTracker {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self { running: Arc::new(Mutex::new(HashSet::new())), scope: Arc::new(TaskScope::new()), duration }
    }

    /// Mark `id` as running and schedule the revert.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::UnknownTest`] if `id` is not a fixture test.
    pub fn start(&self, id: u32) -> Result<RunStart, RunError> {
        if fixtures::find_test(id).is_none() {
            return Err(RunError::UnknownTest(id));
        }

        if !lock(&self.running).insert(id) {
            return Ok(RunStart { id, running: true, already_running: true });
        }
        info!(test_id = id, duration = ?self.duration, "test run: started");

        let running = Arc::clone(&self.running);
        let duration = self.duration;
        self.scope.spawn(async move {
            tokio::time::sleep(duration).await;
            lock(&running).remove(&id);
            info!(test_id = id, "test run: finished");
        });

        Ok(RunStart { id, running: true, already_running: false })
    }

    #[must_use]
    pub fn is_running(&self, id: u32) -> bool {
        lock(&self.running).contains(&id)
    }

    #[must_use]
    pub fn running_count(&self) -> usize {
        lock(&self.running).len()
    }

    /// Abort pending reverts. Used at shutdown.
    pub fn shutdown(&self) {
        self.scope.shutdown();
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new(DEFAULT_RUN_DURATION)
    }
}

fn lock(set: &Mutex<HashSet<u32>>) -> MutexGuard<'_, HashSet<u32>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "test_runs_test.rs"]
mod tests;
