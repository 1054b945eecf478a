//! Guess outcomes and game phases.

/// Result of evaluating one guess.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum GuessOutcome {
    /// The guess is below the secret.
    #[strum(serialize = "too low")]
    TooLow,
    /// The guess is above the secret.
    #[strum(serialize = "too high")]
    TooHigh,
    /// The guess equals the secret; the game is now finished.
    #[strum(serialize = "match")]
    Match,
}

/// Lifecycle phase of a game. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIs)]
#[strum(serialize_all = "lowercase")]
pub enum GamePhase {
    /// Still accepting guesses.
    Active,
    /// A guess matched the secret.
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn outcomes_render_as_wire_text() {
        assert_eq!(GuessOutcome::TooLow.to_string(), "too low");
        assert_eq!(GuessOutcome::TooHigh.as_ref(), "too high");
        assert_eq!(GuessOutcome::from_str("match"), Ok(GuessOutcome::Match));
    }

    #[test]
    fn phase_renders_lowercase() {
        assert_eq!(GamePhase::Finished.to_string(), "finished");
        assert!(GamePhase::Active.is_active());
    }
}
