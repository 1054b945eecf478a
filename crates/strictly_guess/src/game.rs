//! The single-session guessing state machine.

use crate::{GameId, GameLogger, GamePhase, GuessOutcome, GuessRange, RangeError, SecretSource};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One guessing game.
///
/// The secret is fixed at construction and never exposed, not even through
/// `Debug`. The only mutation is [`Game::evaluate_guess`], which moves the
/// game from [`GamePhase::Active`] to [`GamePhase::Finished`] on a match.
pub struct Game {
    id: GameId,
    answer: i64,
    range: GuessRange,
    guess_count: u32,
    phase: GamePhase,
    logger: Arc<dyn GameLogger>,
}

/// Errors from operating on a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The game already finished; the guess was not counted.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for GameError {}

impl Game {
    /// Creates an active game with a secret drawn from `secrets`.
    ///
    /// The creation event is logged with the id and range only.
    #[instrument(skip(secrets, logger))]
    pub fn new(range: GuessRange, secrets: &dyn SecretSource, logger: Arc<dyn GameLogger>) -> Self {
        let answer = secrets.draw(range);
        debug_assert!(range.contains(answer), "secret source left the range");

        let game = Self {
            id: GameId::new(),
            answer,
            range,
            guess_count: 0,
            phase: GamePhase::Active,
            logger,
        };
        game.logger
            .log(&format!("game created {} with range {}", game.id, game.range));
        game
    }

    /// Creates a game from raw bounds, rejecting `min >= max`.
    #[track_caller]
    pub fn with_bounds(
        min: i64,
        max: i64,
        secrets: &dyn SecretSource,
        logger: Arc<dyn GameLogger>,
    ) -> Result<Self, RangeError> {
        let range = GuessRange::new(min, max)?;
        Ok(Self::new(range, secrets, logger))
    }

    /// Evaluates a guess the caller has already checked against [`Game::range`].
    ///
    /// Every evaluated guess counts, including the matching one. A finished
    /// game refuses the guess with [`GameError::GameOver`] and is left as is.
    #[instrument(skip(self), fields(id = %self.id, guess_count = self.guess_count))]
    pub fn evaluate_guess(&mut self, n: i64) -> Result<GuessOutcome, GameError> {
        if self.phase.is_finished() {
            warn!("Guess against finished game refused");
            return Err(GameError::GameOver);
        }
        debug_assert!(self.range.contains(n), "guess {n} outside {}", self.range);

        self.guess_count = self.guess_count.saturating_add(1);
        let outcome = match n.cmp(&self.answer) {
            std::cmp::Ordering::Less => GuessOutcome::TooLow,
            std::cmp::Ordering::Greater => GuessOutcome::TooHigh,
            std::cmp::Ordering::Equal => {
                self.phase = GamePhase::Finished;
                GuessOutcome::Match
            }
        };

        debug!(%outcome, "Guess evaluated");
        self.logger.log(&format!(
            "received guess #{}, {}, result is {}",
            self.guess_count, n, outcome
        ));
        Ok(outcome)
    }

    /// The game's identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// The allowed guess range.
    pub fn range(&self) -> GuessRange {
        self.range
    }

    /// Number of guesses evaluated so far.
    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// `true` until a guess matches.
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("range", &self.range)
            .field("guess_count", &self.guess_count)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedSecret, NoopLogger, SeededSecrets};

    fn game_with_secret(secret: i64) -> Game {
        Game::new(
            GuessRange::default(),
            &FixedSecret::new(secret),
            Arc::new(NoopLogger),
        )
    }

    #[test]
    fn new_game_is_active_with_no_guesses() {
        let game = game_with_secret(42);
        assert!(game.is_active());
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.guess_count(), 0);
        assert_eq!(game.range(), GuessRange::default());
    }

    #[test]
    fn secret_always_lands_in_range() {
        let secrets = SeededSecrets::new(99);
        for (min, max) in [(1, 2), (1, 100), (-50, 50), (0, 1_000_000)] {
            let range = GuessRange::new(min, max).expect("valid range");
            for _ in 0..200 {
                let game = Game::new(range, &secrets, Arc::new(NoopLogger));
                assert!(range.contains(game.answer));
            }
        }
    }

    #[test]
    fn every_guess_counts_once() {
        let mut game = game_with_secret(50);
        assert_eq!(game.evaluate_guess(1), Ok(GuessOutcome::TooLow));
        assert_eq!(game.guess_count(), 1);
        assert_eq!(game.evaluate_guess(100), Ok(GuessOutcome::TooHigh));
        assert_eq!(game.guess_count(), 2);
        assert_eq!(game.evaluate_guess(50), Ok(GuessOutcome::Match));
        assert_eq!(game.guess_count(), 3);
        assert!(!game.is_active());
    }

    #[test]
    fn finished_game_refuses_guesses_without_counting() {
        let mut game = game_with_secret(7);
        assert_eq!(game.evaluate_guess(7), Ok(GuessOutcome::Match));
        assert_eq!(game.evaluate_guess(7), Err(GameError::GameOver));
        assert_eq!(game.evaluate_guess(3), Err(GameError::GameOver));
        assert_eq!(game.guess_count(), 1);
        assert_eq!(game.phase(), GamePhase::Finished);
    }

    #[test]
    fn guess_count_saturates_instead_of_overflowing() {
        let mut game = game_with_secret(50);
        game.guess_count = u32::MAX;
        assert_eq!(game.evaluate_guess(1), Ok(GuessOutcome::TooLow));
        assert_eq!(game.guess_count(), u32::MAX);
        assert!(game.is_active());
    }

    #[test]
    fn with_bounds_rejects_bad_range() {
        let result = Game::with_bounds(10, 10, &FixedSecret::new(10), Arc::new(NoopLogger));
        assert!(result.is_err());
    }

    #[test]
    fn debug_output_hides_answer() {
        let game = game_with_secret(73);
        let rendered = format!("{game:?}").replace(&game.id().to_string(), "");
        assert!(!rendered.contains("answer"));
        assert!(!rendered.contains("73"));
    }

    #[test]
    fn ids_are_unique() {
        let a = game_with_secret(1);
        let b = game_with_secret(1);
        assert_ne!(a.id(), b.id());
    }
}
