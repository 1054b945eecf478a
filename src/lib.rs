//! Strictly Guessing - a number-guessing game with two front ends.
//!
//! # Architecture
//!
//! - **Game**: the single-session state machine from [`strictly_guess`]
//! - **Server**: session store, dispatcher and HTTP routes from [`strictly_guess_server`]
//! - **Console**: an interactive loop that owns exactly one game
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_guessing::{FixedSecret, Game, GuessRange, NoopLogger, play};
//!
//! let mut game = Game::new(GuessRange::default(), &FixedSecret::new(30), Arc::new(NoopLogger));
//! let mut output = Vec::new();
//! let guesses = play(&mut game, "50\n30\n".as_bytes(), &mut output).expect("game finishes");
//! assert_eq!(guesses, 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod console;

pub use console::{ConsoleError, play};

pub use strictly_guess::{
    FixedSecret, Game, GameError, GameId, GameLogger, GamePhase, GuessOutcome, GuessRange,
    NoopLogger, SecretSource, SeededSecrets, StdoutLogger, ThreadSecrets, TracingLogger,
};
pub use strictly_guess_server::{
    ConfigError, DispatchError, DispatchErrorKind, Dispatcher, GameRequest, GameResponse, Route,
    ServerConfig, SessionHandle, SessionManager, router, serve, spawn_idle_sweeper,
};
