//! Strictly Guessing - Unified CLI
//!
//! Plays the guessing game in the terminal or serves it over HTTP.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, HttpArgs};
use std::sync::Arc;
use strictly_guess::{
    Game, GameLogger, GuessRange, SecretSource, SeededSecrets, StdoutLogger, ThreadSecrets,
    TracingLogger,
};
use strictly_guess_server::{Dispatcher, serve, spawn_idle_sweeper};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Console {
            min,
            max,
            seed,
            log_stdout,
        } => run_console(min, max, seed, log_stdout).await,
        Command::Http(args) => run_http_server(args).await,
    }
}

/// Play one game on stdin/stdout. Diagnostics go to stderr unless
/// `log_stdout` puts game events on stdout with the prompts.
async fn run_console(min: i64, max: i64, seed: Option<u64>, log_stdout: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let range = GuessRange::new(min, max)?;
    let secrets: Box<dyn SecretSource> = match seed {
        Some(seed) => Box::new(SeededSecrets::new(seed)),
        None => Box::new(ThreadSecrets),
    };
    let logger: Arc<dyn GameLogger> = if log_stdout {
        Arc::new(StdoutLogger)
    } else {
        Arc::new(TracingLogger)
    };
    let mut game = Game::new(range, secrets.as_ref(), logger);

    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        strictly_guessing::play(&mut game, stdin.lock(), &mut stdout)
    })
    .await
    .context("Console task failed")??;

    Ok(())
}

/// Run the HTTP game server
async fn run_http_server(args: HttpArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_guess_server=debug")),
        )
        .init();

    let config = args
        .into_config(|key| std::env::var(key).ok())
        .context("Invalid server configuration")?;
    let sessions = config.session_manager()?;

    info!(
        host = %config.host(),
        port = config.port(),
        range = %sessions.range(),
        "Starting guessing game server"
    );

    let sweeper = match config.session_ttl() {
        Some(ttl) => Some(spawn_idle_sweeper(
            sessions.clone(),
            ttl,
            config.sweep_interval(),
        )),
        None => {
            warn!("Session eviction disabled - sessions live until the server exits");
            None
        }
    };

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port()))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host(), config.port()))?;

    serve(listener, Dispatcher::new(sessions)).await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    Ok(())
}
