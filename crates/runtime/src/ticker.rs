use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    Running,
    Stopped,
}

/// A repeating simulator timer. Spawning registers exactly one interval
/// task; `shutdown` is idempotent, so rapid start/stop cycling can never
/// leave a duplicate timer behind.
#[derive(Debug)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        assert!(!period.is_zero(), "ticker period must be non-zero");

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately;
            // consume it so the first callback lands one period after spawn.
            interval.tick().await;
            loop {
                interval.tick().await;
                on_tick();
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Wraps an already-spawned loop so it shares the same teardown
    /// guarantees as interval tickers.
    pub fn from_handle(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn state(&self) -> TickerState {
        match &self.handle {
            Some(handle) if !handle.is_finished() => TickerState::Running,
            _ => TickerState::Stopped,
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
