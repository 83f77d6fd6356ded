use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use runtime::events::DashboardEvent;
use runtime::snapshot::DashboardSnapshot;
use runtime::Dashboard;
use tokio::sync::broadcast;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StartSessionError {
    AlreadyTrading,
    SessionIdOverflow,
}

/// Shared handle the routes operate on: the simulator dashboard plus a
/// monotonically increasing session counter.
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Dashboard>,
    next_session_id: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            next_session_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Activates trading and hands back the new session id. Fails when a
    /// session is already running.
    pub fn start_session(&self) -> Result<u64, StartSessionError> {
        if !self.dashboard.start_trading() {
            return Err(StartSessionError::AlreadyTrading);
        }

        match self
            .next_session_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current.checked_add(1)
            }) {
            Ok(previous) => Ok(previous + 1),
            Err(_) => {
                self.dashboard.stop_trading();
                Err(StartSessionError::SessionIdOverflow)
            }
        }
    }

    /// Deactivates trading. Returns whether a session was actually running;
    /// stopping an idle dashboard is a no-op.
    pub fn stop_session(&self) -> bool {
        self.dashboard.stop_trading()
    }

    pub fn trading_active(&self) -> bool {
        self.dashboard.trading_active()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.dashboard.snapshot()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DashboardEvent> {
        self.dashboard.subscribe_events()
    }

    #[cfg(test)]
    pub(crate) fn with_next_session_id_for_test(dashboard: Dashboard, next_session_id: u64) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            next_session_id: Arc::new(AtomicU64::new(next_session_id)),
        }
    }
}
