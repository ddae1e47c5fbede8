use futures_util::future::BoxFuture;
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use crate::{
    schedule::{every, RefreshHandle},
    state::{Board, ViewState},
    Error,
};

type Fetch<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// Keeps a view state fresh by fetching on a fixed period.
///
/// Every tick starts its own fetch without waiting for earlier ones; a fetch
/// that finishes after a newer one has started is discarded.
pub struct Watch<T> {
    board: Arc<Mutex<Board<T>>>,
    fetch: Fetch<T>,
    handle: RefreshHandle,
}

impl<T: Clone + Send + 'static> Watch<T> {
    /// Start fetching right away and then once every `period`.
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, Error>> + Send + Sync + 'static,
    {
        let board = Arc::new(Mutex::new(Board::new()));
        let fetch: Fetch<T> = Arc::new(fetch);

        let handle = {
            let board = board.clone();
            let fetch = fetch.clone();
            every(period, move || trigger(&board, &fetch))
        };

        Watch {
            board,
            fetch,
            handle,
        }
    }

    /// The current view state.
    pub fn state(&self) -> ViewState<T> {
        lock(&self.board).state().clone()
    }

    /// Fetch now, in addition to the periodic schedule.
    pub fn refresh(&self) {
        if self.handle.is_cancelled() {
            log::warn!("Ignoring refresh of a stopped watch");
            return;
        }
        trigger(&self.board, &self.fetch);
    }

    /// Stop refreshing and drop results of fetches still in flight.
    pub fn stop(&self) {
        if !self.handle.is_cancelled() {
            self.handle.cancel();
            lock(&self.board).retire();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_cancelled()
    }
}

impl<T> Drop for Watch<T> {
    fn drop(&mut self) {
        if !self.handle.is_cancelled() {
            self.handle.cancel();
            lock(&self.board).retire();
        }
    }
}

fn trigger<T: Send + 'static>(board: &Arc<Mutex<Board<T>>>, fetch: &Fetch<T>) {
    let ticket = lock(board).begin();
    let future = fetch();
    let board = board.clone();
    tokio::spawn(async move {
        let result = future.await;
        lock(&board).complete(ticket, result);
    });
}

// The board stays consistent even if a holder panicked.
fn lock<T>(board: &Mutex<Board<T>>) -> MutexGuard<'_, Board<T>> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}
