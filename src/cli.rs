//! Command-line interface for strictly_guessing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_guess_server::{ConfigError, ServerConfig};
use tracing::{debug, instrument};

/// Strictly Guessing - guess the secret number
#[derive(Parser, Debug)]
#[command(name = "strictly_guessing")]
#[command(about = "Number-guessing game for the console or over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game in the terminal
    Console {
        /// Lowest possible number
        #[arg(long, default_value_t = strictly_guess::DEFAULT_MIN, allow_negative_numbers = true)]
        min: i64,

        /// Highest possible number
        #[arg(long, default_value_t = strictly_guess::DEFAULT_MAX, allow_negative_numbers = true)]
        max: i64,

        /// Seed for a reproducible secret
        #[arg(long)]
        seed: Option<u64>,

        /// Print each game event to stdout alongside the prompts
        #[arg(long)]
        log_stdout: bool,
    },

    /// Run the HTTP game server
    Http(HttpArgs),
}

/// Options for the HTTP server. Flags override the config file and environment.
#[derive(Args, Debug, Default)]
pub struct HttpArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Evict sessions idle for this many seconds
    #[arg(long)]
    pub session_ttl_secs: Option<u64>,

    /// Seed for reproducible secrets
    #[arg(long)]
    pub seed: Option<u64>,
}

impl HttpArgs {
    /// Layers defaults, the config file, `lookup`ed environment and these flags.
    #[instrument(skip(lookup))]
    pub fn into_config(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        }
        .apply_env_with(lookup)?;

        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(ttl) = self.session_ttl_secs {
            config = config.with_session_ttl_secs(Some(ttl));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(Some(seed));
        }

        config.validate()?;
        debug!(?config, "Resolved server configuration");
        Ok(config)
    }
}
