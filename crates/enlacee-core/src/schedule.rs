//! Cancellable delayed work on the tokio runtime.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a closure scheduled to run once after a delay.
///
/// Dropping the handle cancels the task if it has not run yet.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Run `f` after `delay`. Must be called from within a tokio runtime.
    pub fn spawn<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        Self { handle }
    }

    /// Cancel the task. Has no effect if it already ran.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!("Cancelling delayed task");
            self.handle.abort();
        }
    }

    /// True once the task has run or been cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
