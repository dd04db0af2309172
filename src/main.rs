use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratewatch::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ratewatch::AppCommand {
    fn from(cmd: Commands) -> ratewatch::AppCommand {
        match cmd {
            Commands::Fetch => ratewatch::AppCommand::Fetch,
            Commands::Check => ratewatch::AppCommand::Check,
            Commands::Run => ratewatch::AppCommand::Run,
            Commands::History { limit } => ratewatch::AppCommand::History { limit },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch today's rate and append it to the log
    Fetch,
    /// Email an alert if the latest rate dropped
    Check,
    /// Fetch, then check for a drop (the daily job)
    Run,
    /// Display the recorded rates
    History {
        /// Show only the most recent N days
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratewatch::cli::setup::setup(),
        Some(cmd) => ratewatch::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
