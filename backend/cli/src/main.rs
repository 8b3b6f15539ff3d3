use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use nexusbot_api::ApiClient;
use nexusbot_channels::DiscordPlatform;
use nexusbot_commands::build_bot;
use nexusbot_config::defaults::LOG_FILE_NAME;

#[derive(Parser)]
#[command(name = "nexusbot")]
#[command(about = "Discord bot for the NeuralNexus API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve slash commands (default)
    Run,
    /// Print the command descriptors that would be registered, as JSON
    Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run().await,
        Commands::Commands => print_commands(),
    }
}

fn print_commands() -> Result<()> {
    // Descriptors do not depend on the backend location.
    let api = Arc::new(ApiClient::new(nexusbot_config::defaults::DEFAULT_API_BASE_URL, ""));
    let bot = build_bot(api, false)?;
    println!("{}", serde_json::to_string_pretty(bot.descriptors())?);
    Ok(())
}

async fn run() -> Result<()> {
    let config = nexusbot_config::from_env()?;
    nexusbot_logging::init_logger(&config.log_level, config.log_dir.as_deref(), LOG_FILE_NAME);
    nexusbot_config::ensure_valid(&config)?;

    info!(
        api = %config.api_base_url,
        guild = ?config.guild_id,
        remove_commands = config.remove_commands,
        "Starting NeuralNexus bot"
    );

    let guild_id = config
        .guild_id
        .as_deref()
        .map(str::parse::<u64>)
        .transpose()
        .context("GUILD_ID must be a numeric snowflake")?;

    let api = Arc::new(ApiClient::new(&config.api_base_url, &config.api_key));
    let mut bot = build_bot(api, config.remove_commands)?;
    let mut platform = DiscordPlatform::new(&config.bot_token, guild_id);

    let report = bot.run(&mut platform, shutdown_signal()).await?;
    info!(
        received = report.received,
        dropped = report.dropped,
        delivery_failed = report.delivery_failed,
        deleted = report.deleted,
        failed_deletions = report.failed_deletions,
        "Shutdown complete"
    );
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
