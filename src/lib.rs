pub mod cli;
pub mod core;
pub mod fetcher;
pub mod notifier;
pub mod pipeline;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Fetch,
    Check,
    Run,
    History { limit: Option<usize> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Rate watch starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Fetch => cli::daily::fetch(&config).await,
        AppCommand::Check => cli::daily::check(&config).await,
        AppCommand::Run => cli::daily::run(&config).await,
        AppCommand::History { limit } => cli::history::run(
            &store::RateLog::new(config.log_path()?),
            limit,
            &config.base_currency,
            &config.target_currency,
        ),
    }
}
