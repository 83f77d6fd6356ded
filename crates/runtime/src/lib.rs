pub mod dashboard;
pub mod events;
pub mod logging;
pub mod runlog;
pub mod snapshot;
pub mod ticker;

pub use dashboard::Dashboard;

pub fn module_ready() -> bool {
    true
}
