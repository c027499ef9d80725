//! Background loading.
//!
//! A load runs on its own worker thread and delivers exactly one
//! `Result<T>` over a `flume` channel. The render loop keeps a
//! [`LoadState`] and calls [`LoadState::poll`] once per frame; "not loaded
//! yet" is an ordinary state, never a missing value.

use std::path::PathBuf;

use flume::TryRecvError;

use crate::errors::{Error, Result};

/// Receiving end of a background load.
#[derive(Debug)]
pub struct PendingAsset<T> {
    path: PathBuf,
    receiver: flume::Receiver<Result<T>>,
}

impl<T: Send + 'static> PendingAsset<T> {
    /// Runs `job` on a new thread. `path` only labels the load.
    pub fn spawn<F>(path: PathBuf, job: F) -> LoadState<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (sender, receiver) = flume::bounded(1);
        let thread_name = format!("asset-loader:{}", path.display());

        let spawned = std::thread::Builder::new().name(thread_name).spawn(move || {
            // The receiver may already be gone if the demo shut down.
            let _ = sender.send(job());
        });

        match spawned {
            Ok(_) => LoadState::Pending(Self { path, receiver }),
            Err(source) => LoadState::Failed(Error::Io { path, source }),
        }
    }
}

impl<T> PendingAsset<T> {
    /// Non-blocking check for the result.
    pub fn try_take(&self) -> Option<Result<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::LoaderDisconnected(self.path.clone()))),
        }
    }

    /// Blocks until the result arrives.
    pub fn wait(self) -> Result<T> {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(Error::LoaderDisconnected(self.path)))
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/// Lifecycle of an asynchronously loaded asset.
#[derive(Debug)]
pub enum LoadState<T> {
    Pending(PendingAsset<T>),
    Ready(T),
    Failed(Error),
}

impl<T> LoadState<T> {
    /// Moves `Pending` to `Ready` or `Failed` once the result has arrived.
    ///
    /// Returns `true` only on the call that performs the transition.
    pub fn poll(&mut self) -> bool {
        let result = match self {
            Self::Pending(pending) => pending.try_take(),
            Self::Ready(_) | Self::Failed(_) => None,
        };
        let Some(result) = result else {
            return false;
        };

        *self = match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e),
        };
        true
    }

    /// Blocks until the load settles.
    pub fn block(self) -> Self {
        match self {
            Self::Pending(pending) => match pending.wait() {
                Ok(value) => Self::Ready(value),
                Err(e) => Self::Failed(e),
            },
            settled => settled,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Short status line for display.
    #[must_use]
    pub fn status(&self) -> String {
        match self {
            Self::Pending(p) => format!("loading {}", p.path().display()),
            Self::Ready(_) => "loaded".to_string(),
            Self::Failed(e) => format!("failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_result_once() {
        let mut state = PendingAsset::spawn(PathBuf::from("answer"), || Ok(42));
        if let LoadState::Pending(p) = &state {
            assert_eq!(p.path(), std::path::Path::new("answer"));
        }
        state = state.block();
        assert_eq!(state.ready(), Some(&42));
        assert!(!state.poll());
    }

    #[test]
    fn panicking_job_reports_disconnect() {
        let state: LoadState<u32> = PendingAsset::spawn(PathBuf::from("boom"), || panic!("worker died"));
        let state = state.block();
        assert!(matches!(state.error(), Some(Error::LoaderDisconnected(_))));
    }
}
