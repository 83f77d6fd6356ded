use std::io;

use crate::events::DashboardEvent;

/// Sink for the stream of dashboard events a run produces.
pub trait RunLogWriter {
    fn write(&mut self, event: &DashboardEvent) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<DashboardEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DashboardEvent] {
        &self.events
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: &DashboardEvent) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
