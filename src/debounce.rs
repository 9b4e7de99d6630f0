//! Cancellable settle timer.
//!
//! A [`Debouncer`] holds at most one pending timer task. Scheduling a new value
//! aborts the pending one, so only a timer that runs to expiry uninterrupted
//! delivers its value. Dropping the debouncer aborts whatever is pending.
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

pub struct Debouncer<T> {
    runtime: Handle,
    delay: Duration,
    tx: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Timers are spawned on `runtime`; expired values are sent on `tx`.
    pub fn new(runtime: Handle, delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            runtime,
            delay,
            tx,
            pending: None,
        }
    }

    /// Restart the timer with `value`, superseding any pending one.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                trace!("debounce timer superseded");
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn rapid_values_commit_only_the_last() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Handle::current(), DEFAULT_DELAY, tx);
        for value in ["t", "te", "tes", "test"] {
            debouncer.schedule(value.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(debouncer.is_pending());
        sleep(Duration::from_millis(600)).await;

        assert_eq!(rx.try_recv().ok(), Some("test".to_string()));
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn value_waits_for_full_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Handle::current(), DEFAULT_DELAY, tx);
        debouncer.schedule(1u32);
        sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());
        sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv().ok(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_discard_pending_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Handle::current(), DEFAULT_DELAY, tx.clone());
        debouncer.schedule("cancelled");
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        debouncer.schedule("dropped");
        drop(debouncer);
        sleep(Duration::from_secs(1)).await;
        drop(tx);
        assert!(rx.recv().await.is_none());
    }
}
