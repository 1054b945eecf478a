//! Tests for the console game loop.

use std::sync::Arc;
use strictly_guessing::{FixedSecret, Game, GuessRange, NoopLogger, StdoutLogger, play};

fn game(secret: i64) -> Game {
    Game::new(GuessRange::default(), &FixedSecret::new(secret), Arc::new(NoopLogger))
}

fn run(secret: i64, input: &str) -> (Result<u32, strictly_guessing::ConsoleError>, String) {
    let mut game = game(secret);
    let mut output = Vec::new();
    let result = play(&mut game, input.as_bytes(), &mut output);
    (result, String::from_utf8(output).expect("utf-8 output"))
}

#[test]
fn test_console_transcript() {
    let (result, output) = run(42, "10\n90\n42\n");
    assert_eq!(result.expect("game finished"), 3);
    assert_eq!(
        output,
        "Guess the number between 1 and 100.\n\
         Guess: too low\n\
         Guess: too high\n\
         Guess: match\n\
         You took 3 guesses.\n"
    );
}

#[test]
fn test_invalid_input_does_not_count() {
    let (result, output) = run(42, "abc\n0\n101\n\n42\n");
    assert_eq!(result.expect("game finished"), 1);
    assert_eq!(output.matches("Not a valid guess.").count(), 4);
    assert!(output.ends_with("You took 1 guesses.\n"));
}

#[test]
fn test_windows_line_endings() {
    let (result, _) = run(7, "7\r\n");
    assert_eq!(result.expect("game finished"), 1);
}

#[test]
fn test_last_line_without_newline() {
    let (result, _) = run(7, "3\n7");
    assert_eq!(result.expect("game finished"), 2);
}

#[test]
fn test_input_closed_early_is_an_error() {
    let (result, output) = run(42, "10\n");
    let err = result.expect_err("input ran out");
    assert!(err.message.contains("input closed"));
    assert!(output.contains("too low"));
}

#[test]
fn test_custom_range_in_prompt() {
    let mut game = Game::new(
        GuessRange::new(-5, 5).expect("range"),
        &FixedSecret::new(-5),
        Arc::new(NoopLogger),
    );
    let mut output = Vec::new();
    play(&mut game, "-5\n".as_bytes(), &mut output).expect("game finished");
    let output = String::from_utf8(output).expect("utf-8 output");
    assert!(output.starts_with("Guess the number between -5 and 5.\n"));
}

#[test]
fn test_stdout_logger_leaves_transcript_unchanged() {
    let mut game = Game::new(GuessRange::default(), &FixedSecret::new(42), Arc::new(StdoutLogger));
    let mut output = Vec::new();
    let guesses = play(&mut game, "10\n42\n".as_bytes(), &mut output).expect("game finished");
    assert_eq!(guesses, 2);
    let output = String::from_utf8(output).expect("utf-8 output");
    assert!(!output.contains("received guess"));
    assert!(output.ends_with("You took 2 guesses.\n"));
}
