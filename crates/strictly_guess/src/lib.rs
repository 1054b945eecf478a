//! Pure number-guessing game logic.
//!
//! A [`Game`] holds a secret drawn from a closed [`GuessRange`] and answers
//! each guess with a [`GuessOutcome`]. Games start active and finish on the
//! first matching guess; nothing moves them back.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_guess::{FixedSecret, Game, GuessOutcome, GuessRange, NoopLogger};
//!
//! let mut game = Game::new(GuessRange::default(), &FixedSecret::new(42), Arc::new(NoopLogger));
//! assert_eq!(game.evaluate_guess(10), Ok(GuessOutcome::TooLow));
//! assert_eq!(game.evaluate_guess(42), Ok(GuessOutcome::Match));
//! assert!(!game.is_active());
//! assert_eq!(game.guess_count(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod id;
mod logger;
mod outcome;
mod range;
mod secret;

pub use game::{Game, GameError};
pub use id::{GameId, IdError};
pub use logger::{GameLogger, NoopLogger, StdoutLogger, TracingLogger};
pub use outcome::{GamePhase, GuessOutcome};
pub use range::{DEFAULT_MAX, DEFAULT_MIN, GuessRange, RangeError};
pub use secret::{FixedSecret, SecretSource, SeededSecrets, ThreadSecrets};
