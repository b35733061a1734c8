//! Cancellable delayed task used to debounce the query.
//!
//! A [`Debouncer`] holds at most one pending timer. Scheduling aborts the
//! previous timer before spawning the next, so only the most recent value
//! can ever fire. Dropping the debouncer aborts whatever is still pending.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `fire` once `delay` has elapsed without another call to
    /// `schedule` or [`cancel`](Self::cancel). Must be called inside a tokio
    /// runtime.
    pub fn schedule<F>(&mut self, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire();
        }));
    }

    /// Abort the pending timer. Returns `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                trace!("Cancelling pending debounce timer");
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Box<dyn FnOnce() + Send>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let make = move |value: &str| -> Box<dyn FnOnce() + Send> {
            let sink = sink.clone();
            let value = value.to_string();
            Box::new(move || sink.lock().unwrap().push(value))
        };
        (fired, make)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_quiet_period() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(make("soup"));
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["soup"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_drops_earlier_values() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        for value in ["c", "ch", "chi", "chic", "chick"] {
            debouncer.schedule(make(value));
            tokio::time::sleep(Duration::from_millis(120)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["chick"]);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.schedule(make("soup"));
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_reports_whether_timer_was_pending() {
        let (_fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        assert!(!debouncer.cancel());
        debouncer.schedule(make("a"));
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());
    }
}
