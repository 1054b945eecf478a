//! The closed range a game's secret and guesses are drawn from.

use derive_more::{Display, Error};
use tracing::instrument;

/// Lowest guess allowed by default.
pub const DEFAULT_MIN: i64 = 1;

/// Highest guess allowed by default.
pub const DEFAULT_MAX: i64 = 100;

/// Closed guess range `[min, max]` with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{min}..={max}")]
pub struct GuessRange {
    min: i64,
    max: i64,
}

impl GuessRange {
    /// Creates a range, rejecting `min >= max`.
    #[track_caller]
    #[instrument]
    pub fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        if min >= max {
            return Err(RangeError::new(format!(
                "minimum {min} must be below maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lowest allowed guess.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Highest allowed guess.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Whether `n` lies inside the range.
    pub fn contains(&self, n: i64) -> bool {
        (self.min..=self.max).contains(&n)
    }

    /// Parses `raw` as a decimal integer inside the range.
    ///
    /// No whitespace is stripped; callers decide what framing to remove.
    pub fn parse_guess(&self, raw: &str) -> Option<i64> {
        raw.parse::<i64>().ok().filter(|n| self.contains(*n))
    }
}

impl Default for GuessRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

/// Invalid range bounds, with the location that tried to build them.
#[derive(Debug, Clone, Display, Error)]
#[display("Range error: {} at {}:{}", message, file, line)]
pub struct RangeError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RangeError {
    /// Creates a new range error with caller location tracking.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_to_hundred() {
        let range = GuessRange::default();
        assert_eq!((range.min(), range.max()), (1, 100));
        assert_eq!(range.to_string(), "1..=100");
    }

    #[test]
    fn inverted_and_empty_ranges_are_rejected() {
        assert!(GuessRange::new(5, 5).is_err());
        assert!(GuessRange::new(10, 1).is_err());
        assert!(GuessRange::new(-3, -2).is_ok());
    }

    #[test]
    fn parse_guess_checks_bounds_and_syntax() {
        let range = GuessRange::default();
        assert_eq!(range.parse_guess("1"), Some(1));
        assert_eq!(range.parse_guess("100"), Some(100));
        assert_eq!(range.parse_guess("0"), None);
        assert_eq!(range.parse_guess("101"), None);
        assert_eq!(range.parse_guess("abc"), None);
        assert_eq!(range.parse_guess(""), None);
        assert_eq!(range.parse_guess("42\n"), None);
        assert_eq!(range.parse_guess("4.2"), None);
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = GuessRange::new(-5, 5).expect("valid range");
        assert!(range.contains(-5));
        assert!(range.contains(5));
        assert!(!range.contains(6));
    }
}
