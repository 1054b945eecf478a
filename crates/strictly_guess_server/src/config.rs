//! Server configuration: defaults, TOML file, then environment.

use crate::SessionManager;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use strictly_guess::{DEFAULT_MAX, DEFAULT_MIN, GuessRange, SeededSecrets, ThreadSecrets};
use tracing::{debug, info, instrument};

/// Settings for the HTTP server and the sessions it creates.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Host to bind to.
    host: String,

    /// Port to bind to.
    port: u16,

    /// Lowest allowed guess in new sessions.
    min: i64,

    /// Highest allowed guess in new sessions.
    max: i64,

    /// Evict sessions idle for this many seconds; `None` keeps them forever.
    session_ttl_secs: Option<u64>,

    /// How often the idle sweeper runs.
    sweep_interval_secs: u64,

    /// Seed for reproducible secrets.
    seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            session_ttl_secs: None,
            sweep_interval_secs: 60,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Overrides fields from environment variables returned by `lookup`,
    /// usually `|key| std::env::var(key).ok()`.
    ///
    /// Recognised keys: `GUESS_HOST`, `GUESS_PORT`, `GUESS_MIN`, `GUESS_MAX`,
    /// `GUESS_SESSION_TTL_SECS`, `GUESS_SWEEP_INTERVAL_SECS`, `GUESS_SEED`.
    #[instrument(skip_all)]
    pub fn apply_env_with(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("GUESS_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(&lookup, "GUESS_PORT")? {
            self.port = port;
        }
        if let Some(min) = parse_var(&lookup, "GUESS_MIN")? {
            self.min = min;
        }
        if let Some(max) = parse_var(&lookup, "GUESS_MAX")? {
            self.max = max;
        }
        if let Some(ttl) = parse_var(&lookup, "GUESS_SESSION_TTL_SECS")? {
            self.session_ttl_secs = Some(ttl);
        }
        if let Some(every) = parse_var(&lookup, "GUESS_SWEEP_INTERVAL_SECS")? {
            self.sweep_interval_secs = every;
        }
        if let Some(seed) = parse_var(&lookup, "GUESS_SEED")? {
            self.seed = Some(seed);
        }
        Ok(self)
    }

    /// Checks the range and sweep interval.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range()?;
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::new(
                "sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Guess range for new sessions.
    pub fn range(&self) -> Result<GuessRange, ConfigError> {
        GuessRange::new(self.min, self.max).map_err(|e| ConfigError::new(e.message))
    }

    /// Idle time after which sessions are evicted, if eviction is on.
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_secs.map(Duration::from_secs)
    }

    /// Interval between idle sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Builds an empty session store configured from these settings.
    #[instrument(skip(self))]
    pub fn session_manager(&self) -> Result<SessionManager, ConfigError> {
        self.validate()?;
        let sessions = SessionManager::new().with_range(self.range()?);
        Ok(match self.seed {
            Some(seed) => sessions.with_secrets(Arc::new(SeededSecrets::new(seed))),
            None => sessions.with_secrets(Arc::new(ThreadSecrets)),
        })
    }
}

#[track_caller]
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {key}={raw:?}: {e}")))
        })
        .transpose()
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
