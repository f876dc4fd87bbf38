//! CamView: terminal player for recorded camera streams.

mod app;
mod app_command;
mod config;
mod error;
mod headless_sink;
mod http_engine;
mod recordings_client;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    headless_sink::HeadlessSink,
    http_engine::HttpRuntime,
    recordings_client::RecordingsClient,
};

use crate::config::Config;

use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "camview=debug,camview_core=debug";

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Logs go to stderr so stdout stays readable as the command console.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    // Current-thread runtime: engine fetches and session transitions all
    // interleave on the driver thread.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(config)) {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> AppResult<()> {
    let app = App::new(&config)?;
    app.run().await
}
