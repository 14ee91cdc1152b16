//! Scoped ownership of background tasks.
//!
//! DESIGN
//! ======
//! Each owner (service state, CLI session) holds its own `TaskScope`.
//! Every timer or simulation it spawns is registered here and aborted on
//! `shutdown()` or when the scope is dropped, so nothing outlives its
//! owner. There is no process-wide registry.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::AbortHandle;

#[derive(Default)]
pub struct TaskScope {
    handles: Mutex<Vec<AbortHandle>>,
}

impl TaskScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `fut` on the current runtime and register it with this scope.
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut).abort_handle();
        let mut handles = self.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);
    }

    /// Number of registered tasks that have not finished yet.
    #[must_use]
    pub fn active(&self) -> usize {
        let mut handles = self.lock();
        handles.retain(|h| !h.is_finished());
        handles.len()
    }

    /// Abort every registered task. The scope stays usable afterwards.
    pub fn shutdown(&self) {
        let drained: Vec<AbortHandle> = self.lock().drain(..).collect();
        if !drained.is_empty() {
            tracing::debug!(count = drained.len(), "scope: aborting tasks");
        }
        for handle in drained {
            handle.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AbortHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
