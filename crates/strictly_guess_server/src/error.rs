//! Client-facing rejections.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use tracing::instrument;

/// Classification of a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIs)]
pub enum DispatchErrorKind {
    /// Wrong HTTP method for the route.
    MethodNotAllowed,
    /// The session id is missing or not a hyphenated UUID.
    InvalidIdentifier,
    /// Well-formed id with no live session.
    NotFound,
    /// Guess body unreadable, not an integer, or out of range.
    InvalidGuess,
    /// The session already finished.
    RejectedInactive,
}

impl DispatchErrorKind {
    /// HTTP status reported for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed
            | Self::InvalidIdentifier
            | Self::InvalidGuess
            | Self::RejectedInactive => StatusCode::BAD_REQUEST,
        }
    }
}

/// A rejected request with its message and where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("{}: {} at {}:{}", kind, message, file, line)]
pub struct DispatchError {
    /// What went wrong.
    pub kind: DispatchErrorKind,
    /// Message returned to the client.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DispatchError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wrong method for the route.
    #[track_caller]
    pub fn method_not_allowed() -> Self {
        Self::new(
            DispatchErrorKind::MethodNotAllowed,
            "endpoint does not support this HTTP method",
        )
    }

    /// No `id` was supplied.
    #[track_caller]
    pub fn missing_identifier() -> Self {
        Self::new(DispatchErrorKind::InvalidIdentifier, "must provide a game id")
    }

    /// The `id` is not a hyphenated UUID.
    #[track_caller]
    pub fn invalid_identifier() -> Self {
        Self::new(DispatchErrorKind::InvalidIdentifier, "invalid game id")
    }

    /// No session under that id.
    #[track_caller]
    pub fn not_found() -> Self {
        Self::new(DispatchErrorKind::NotFound, "game not found")
    }

    /// The guess body could not be read.
    #[track_caller]
    pub fn missing_guess() -> Self {
        Self::new(DispatchErrorKind::InvalidGuess, "must provide a guess")
    }

    /// The guess could not be used.
    #[track_caller]
    pub fn invalid_guess() -> Self {
        Self::new(DispatchErrorKind::InvalidGuess, "not a valid guess")
    }

    /// The session already finished.
    #[track_caller]
    pub fn rejected_inactive() -> Self {
        Self::new(DispatchErrorKind::RejectedInactive, "game is not active")
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.status(), self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_found_maps_to_404() {
        assert_eq!(DispatchError::not_found().status(), StatusCode::NOT_FOUND);
        for err in [
            DispatchError::method_not_allowed(),
            DispatchError::missing_identifier(),
            DispatchError::invalid_identifier(),
            DispatchError::invalid_guess(),
            DispatchError::rejected_inactive(),
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn records_caller_location() {
        let err = DispatchError::invalid_guess();
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("InvalidGuess: not a valid guess at "));
    }
}
