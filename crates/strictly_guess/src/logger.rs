//! Log sinks a [`Game`](crate::Game) reports its events to.

use tracing::info;

/// Fire-and-forget log capability injected into every game.
///
/// Implementations must not panic and cannot report failure.
pub trait GameLogger: Send + Sync {
    /// Records one message.
    fn log(&self, message: &str);
}

/// Forwards messages to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GameLogger for TracingLogger {
    fn log(&self, message: &str) {
        info!(target: "strictly_guess::game", "{message}");
    }
}

/// Prints each message on its own line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLogger;

impl GameLogger for StdoutLogger {
    fn log(&self, message: &str) {
        println!("{message}");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl GameLogger for NoopLogger {
    fn log(&self, _message: &str) {}
}
