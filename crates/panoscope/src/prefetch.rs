//! Cancellable background pre-fetch of the next panorama asset.
//!
//! A fetch runs on a named background thread and reports through a channel;
//! the switch stage blocks on [`PrefetchTask::wait`] at the one point the
//! asset must be ready. The task is generic over the asset type - decoding
//! panorama images is the host's concern.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use panoscope_core::{PanoscopeError, Result};

/// Cooperative cancellation flag shared with a fetch closure.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once cancellation was requested. Long fetches should poll this
    /// between chunks and bail out early.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A background fetch of one viewpoint's panorama asset, keyed by
/// viewpoint id. Dropping the task requests cancellation.
pub struct PrefetchTask<T> {
    viewpoint_id: u32,
    token: CancelToken,
    receiver: Receiver<Result<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> PrefetchTask<T> {
    /// Spawns `fetch` on a background thread.
    ///
    /// The closure receives the task's [`CancelToken`] so it can stop early
    /// when the user navigates elsewhere.
    pub fn spawn<F>(viewpoint_id: u32, fetch: F) -> Self
    where
        F: FnOnce(&CancelToken) -> Result<T> + Send + 'static,
    {
        let token = CancelToken::new();
        let worker_token = token.clone();
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(format!("panoscope_prefetch_{viewpoint_id}"))
            .spawn(move || {
                let result = if worker_token.is_cancelled() {
                    Err(PanoscopeError::PrefetchCancelled(viewpoint_id))
                } else {
                    fetch(&worker_token)
                };
                let _ = tx.send(result);
            })
            .expect("spawn prefetch thread");
        Self {
            viewpoint_id,
            token,
            receiver: rx,
            handle: Some(handle),
        }
    }

    /// The viewpoint this task is fetching for.
    #[must_use]
    pub fn viewpoint_id(&self) -> u32 {
        self.viewpoint_id
    }

    /// Requests cooperative cancellation without blocking.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the result if the fetch already finished, without blocking.
    pub fn try_take(&mut self) -> Option<Result<T>> {
        self.receiver.try_recv().ok()
    }

    /// Blocks until the fetch completes and returns the asset. The switch
    /// stage calls this when the incoming panorama must be ready.
    pub fn wait(mut self) -> Result<T> {
        let viewpoint_id = self.viewpoint_id;
        let result = self
            .receiver
            .recv()
            .unwrap_or(Err(PanoscopeError::PrefetchCancelled(viewpoint_id)));
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}

impl<T> Drop for PrefetchTask<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
