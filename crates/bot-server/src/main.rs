mod config;
mod wiring;

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

use api::state::AppState;
use runtime::runlog::{spawn_run_log_collector, RunLogJsonWriter};
use runtime::Dashboard;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::from_env()?;
    let run_log = initialize_run_log(&config.run_log_path, config.sim_seed)?;

    let dashboard = Dashboard::spawn(config.sim, config.sim_seed);
    spawn_run_log_collector(dashboard.subscribe_events(), run_log);
    let state = AppState::new(dashboard);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, wiring::build_app(state)).await?;
    Ok(())
}

fn initialize_run_log(path: &str, seed: u64) -> Result<RunLogJsonWriter<File>, std::io::Error> {
    let log_path = Path::new(path);

    if let Some(parent) = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(log_path)?;
    let mut writer = RunLogJsonWriter::new(file);
    writer.write_opening(seed)?;
    Ok(writer)
}
