//! Interactive console game over any reader and writer.

use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use strictly_guess::Game;
use tracing::{debug, info, instrument};

/// Plays `game` to completion, reading guesses line by line from `input`.
///
/// Lines that are not an integer inside the game's range are reported and
/// do not count as a guess. Returns the number of guesses taken.
///
/// # Errors
///
/// Returns [`ConsoleError`] if reading or writing fails, or if `input` ends
/// before the number is guessed.
#[instrument(skip_all, fields(id = %game.id()))]
pub fn play<R: BufRead, W: Write>(
    game: &mut Game,
    mut input: R,
    output: &mut W,
) -> Result<u32, ConsoleError> {
    let range = game.range();
    writeln!(
        output,
        "Guess the number between {} and {}.",
        range.min(),
        range.max()
    )?;

    let mut line = String::new();
    while game.is_active() {
        write!(output, "Guess: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::new(
                "input closed before the number was guessed",
            ));
        }
        let entry = strip_line_ending(&line);

        match range.parse_guess(entry) {
            Some(guess) => {
                let outcome = game
                    .evaluate_guess(guess)
                    .map_err(|e| ConsoleError::new(e.to_string()))?;
                writeln!(output, "{outcome}")?;
            }
            None => {
                debug!(entry, "Rejected console input");
                writeln!(output, "Not a valid guess.")?;
            }
        }
    }

    let guesses = game.guess_count();
    writeln!(output, "You took {guesses} guesses.")?;
    info!(guesses, "Console game finished");
    Ok(guesses)
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Console I/O error with location tracking.
#[derive(Debug, Display, Error)]
#[display("Console error: {} at {}:{}", message, file, line)]
pub struct ConsoleError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConsoleError {
    /// Creates a new console error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for ConsoleError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}
