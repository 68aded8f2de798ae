//! Background task runner with stale-result invalidation
//!
//! Network calls (fetch, dispatch) run on plain threads and report back
//! over an mpsc channel, polled from the main loop on tick. Neither call
//! can be cancelled, so every spawn is stamped with a monotonically
//! increasing token and `poll` only surfaces results carrying the latest
//! token. A slow response superseded by a newer request is drained and
//! dropped instead of overwriting newer state.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Single-purpose background runner; one logical job at a time
pub struct TaskRunner<T> {
    tx: Sender<(u64, T)>,
    rx: Receiver<(u64, T)>,
    latest: u64,
    in_flight: bool,
}

impl<T: Send + 'static> Default for TaskRunner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> TaskRunner<T> {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            latest: 0,
            in_flight: false,
        }
    }

    /// Spawn a task, superseding any task still in flight. Returns the
    /// request token stamped onto the task's result.
    pub fn spawn<F>(&mut self, task: F) -> u64
    where
        F: FnOnce() -> T + Send + 'static,
    {
        self.latest += 1;
        let token = self.latest;
        let tx = self.tx.clone();

        thread::spawn(move || {
            // The receiver may be gone on shutdown; nothing to do then.
            let _ = tx.send((token, task()));
        });

        self.in_flight = true;
        token
    }

    /// Drain completed results, returning only the one matching the latest
    /// issued token. Stale results are discarded.
    pub fn poll(&mut self) -> Option<T> {
        let mut current = None;
        while let Ok((token, value)) = self.rx.try_recv() {
            if token == self.latest {
                current = Some(value);
                self.in_flight = false;
            }
        }
        current
    }

    /// Whether the latest request has not resolved yet
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    fn poll_until<T: Send + 'static>(runner: &mut TaskRunner<T>) -> T {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(value) = runner.poll() {
                return value;
            }
            assert!(Instant::now() < deadline, "task did not resolve in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_result_of_latest_request_is_surfaced() {
        let mut runner: TaskRunner<String> = TaskRunner::new();
        runner.spawn(|| "data".to_string());

        assert!(runner.in_flight());
        assert_eq!(poll_until(&mut runner), "data");
        assert!(!runner.in_flight());
        assert!(runner.poll().is_none());
    }

    #[test]
    fn test_stale_result_is_dropped_when_superseded() {
        let mut runner: TaskRunner<String> = TaskRunner::new();

        // Request A blocks on a gate so it can be forced to resolve after B
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        runner.spawn(move || {
            gate_rx.recv().ok();
            "stale".to_string()
        });
        runner.spawn(|| "fresh".to_string());

        // B resolves first and is the latest request, so it wins
        assert_eq!(poll_until(&mut runner), "fresh");

        // Release A; its late result must never surface
        gate_tx.send(()).ok();
        let deadline = Instant::now() + Duration::from_millis(200);
        while Instant::now() < deadline {
            assert!(runner.poll().is_none());
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_tokens_increase_monotonically() {
        let mut runner: TaskRunner<u32> = TaskRunner::new();
        let first = runner.spawn(|| 1);
        let second = runner.spawn(|| 2);
        assert!(second > first);
        assert_eq!(poll_until(&mut runner), 2);
    }
}
