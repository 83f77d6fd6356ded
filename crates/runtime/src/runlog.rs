use std::io::{self, Write};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::events::DashboardEvent;
use crate::logging::RunLogWriter;

/// First line of every run-log file, marking the seed the run was driven by.
#[derive(Debug, PartialEq, serde::Serialize)]
struct RunLogOpening {
    event_type: &'static str,
    seed: u64,
}

/// Writes dashboard events as JSON lines to any byte sink.
pub struct RunLogJsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> RunLogJsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the opening record and flushes so a crashed run still leaves a
    /// parseable file behind.
    pub fn write_opening(&mut self, seed: u64) -> io::Result<()> {
        let opening = RunLogOpening {
            event_type: "run_log_opened",
            seed,
        };
        let line = serde_json::to_string(&opening).map_err(io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }

    pub fn append(&mut self, event: &DashboardEvent) -> io::Result<()> {
        let line = serde_json::to_string(event).map_err(io::Error::other)?;
        writeln!(self.writer, "{line}")
    }
}

impl<W: Write> RunLogWriter for RunLogJsonWriter<W> {
    fn write(&mut self, event: &DashboardEvent) -> io::Result<()> {
        self.append(event)
    }
}

/// Drains a dashboard event subscription into a run-log sink until the
/// channel closes or the sink fails. Lagged reads skip ahead rather than
/// aborting the log.
pub fn spawn_run_log_collector<W>(
    mut events: broadcast::Receiver<DashboardEvent>,
    mut writer: W,
) -> JoinHandle<()>
where
    W: RunLogWriter + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if writer.write(&event).is_err() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    })
}
