use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tictactoe::config::CliConfig;
use tictactoe::{Config, GameInterface, APP_NAME, VERSION};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe in the terminal")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour theme: default, dark or light
    #[arg(short, long)]
    theme: Option<String>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// Skip the landing page and go straight to the board
    #[arg(long)]
    skip_intro: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(CliConfig {
        log_level: cli.log_level,
        debug: cli.debug,
        theme: cli.theme,
    });
    config.validate()?;

    // stderr keeps log lines out of the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("{}={},warn", APP_NAME, config.logging.level)))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Tic-Tac-Toe v{}", VERSION);

    let mut game_interface = GameInterface::new(config).await?;

    if cli.skip_intro {
        game_interface.play().await?;
    }

    if let Err(e) = game_interface.run().await {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}
