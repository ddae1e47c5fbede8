use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

/// Handle to a periodic task. The task stops when the handle is cancelled
/// or dropped.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
    cancelled: AtomicBool,
}

impl RefreshHandle {
    /// Stop the task. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            log::debug!("Cancelling refresh task");
            self.task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Call `tick` right away and then once every `period` until cancelled.
/// A zero period is treated as one millisecond. Must be called from within
/// a tokio runtime.
pub fn every<F>(period: Duration, mut tick: F) -> RefreshHandle
where
    F: FnMut() + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let task = tokio::spawn(async move {
        let mut interval = interval(period);
        // Late ticks shift the schedule instead of firing in a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            log::trace!("Refresh tick");
            tick();
        }
    });

    RefreshHandle {
        task,
        cancelled: AtomicBool::new(false),
    }
}
