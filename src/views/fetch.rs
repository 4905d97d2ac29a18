//! Fetch-on-mount lifecycle
//!
//! A mounted view owns one spawned fetch task and observes its outcome
//! through a `watch` channel. Dropping the handle aborts the task, so a
//! response that arrives after teardown is discarded instead of applied.

use serde::Serialize;
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::metrics::MetricsError;

/// Lifecycle of a view's remote data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    /// Static, user-facing message
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Handle to an in-flight or settled fetch
pub struct Mounted<T> {
    rx: watch::Receiver<FetchState<T>>,
    task: JoinHandle<()>,
}

impl<T> Mounted<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn `fetch` on the current runtime
    ///
    /// Any error is logged under `view_name` and replaced with `error_message`.
    pub fn spawn<F>(view_name: &'static str, error_message: &'static str, fetch: F) -> Self
    where
        F: Future<Output = Result<T, MetricsError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(FetchState::Loading);

        let task = tokio::spawn(async move {
            let next = match fetch.await {
                Ok(data) => {
                    tracing::debug!(view = view_name, "Fetch completed");
                    FetchState::Loaded(data)
                }
                Err(e) => {
                    tracing::warn!(view = view_name, error = %e, "Fetch failed");
                    FetchState::Failed(error_message.to_string())
                }
            };
            // Receiver gone means the view was torn down
            let _ = tx.send(next);
        });

        Self { rx, task }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.rx.borrow().clone()
    }

    /// Wait until the fetch has either loaded or failed
    pub async fn settled(&mut self) -> FetchState<T> {
        // Err: the task ended without a result; report the last value
        let _ = self.rx.wait_for(|state| !state.is_loading()).await;
        self.rx.borrow().clone()
    }
}

impl<T> Drop for Mounted<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_success_settles_loaded() {
        let mut mounted = Mounted::spawn("test", "failed", async { Ok(42u32) });
        assert_eq!(mounted.settled().await, FetchState::Loaded(42));
        assert_eq!(mounted.state().data(), Some(&42));
    }

    #[tokio::test]
    async fn test_error_becomes_static_message() {
        let mut mounted: Mounted<u32> =
            Mounted::spawn("test", "Could not load.", async { Err(MetricsError::Timeout) });
        let state = mounted.settled().await;
        assert_eq!(state.error(), Some("Could not load."));
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let gate = Arc::new(Notify::new());
        let wait = Arc::clone(&gate);
        let mounted = Mounted::spawn("test", "failed", async move {
            wait.notified().await;
            Ok(1u8)
        });
        assert!(mounted.state().is_loading());
        gate.notify_one();
    }

    #[tokio::test]
    async fn test_drop_aborts_late_response() {
        let gate = Arc::new(Notify::new());
        let applied = Arc::new(AtomicBool::new(false));

        let wait = Arc::clone(&gate);
        let flag = Arc::clone(&applied);
        let mounted = Mounted::spawn("test", "failed", async move {
            wait.notified().await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        drop(mounted);
        gate.notify_one();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert!(!applied.load(Ordering::SeqCst));
    }
}
