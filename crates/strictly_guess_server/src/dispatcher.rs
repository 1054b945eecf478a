//! Turns inbound requests into validated session operations.

use crate::{DispatchError, SessionHandle, SessionManager};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use derive_new::new;
use strictly_guess::{GameId, GuessOutcome};
use tracing::{debug, instrument, warn};

/// The operations the server exposes, one per path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Route {
    /// `GET /new`: create a session.
    #[strum(serialize = "/new")]
    New,
    /// `GET /isactive?id=`: is the session still running.
    #[strum(serialize = "/isactive")]
    IsActive,
    /// `GET /guesscount?id=`: guesses made so far.
    #[strum(serialize = "/guesscount")]
    GuessCount,
    /// `POST /guess?id=` with the guess as the body.
    #[strum(serialize = "/guess")]
    Guess,
}

impl Route {
    /// The only method this route accepts.
    pub fn method(self) -> Method {
        match self {
            Self::Guess => Method::POST,
            Self::New | Self::IsActive | Self::GuessCount => Method::GET,
        }
    }
}

/// One inbound request, independent of the transport that carried it.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct GameRequest {
    /// Which operation.
    route: Route,
    /// Method the client used.
    method: Method,
    /// Raw `id` query value, if any.
    id: Option<String>,
    /// Request body as text; `None` when it could not be read.
    body: Option<String>,
}

/// Successful result of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameResponse {
    /// A session was created.
    #[display("{_0}")]
    Created(GameId),
    /// Whether the session is active.
    #[display("{_0}")]
    Active(bool),
    /// Guesses made so far.
    #[display("{_0}")]
    GuessCount(u32),
    /// Result of a guess.
    #[display("{_0}")]
    Outcome(GuessOutcome),
}

impl IntoResponse for GameResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.to_string()).into_response()
    }
}

/// Validates requests and applies them to the session store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sessions: SessionManager,
}

impl Dispatcher {
    /// Creates a dispatcher over `sessions`.
    pub fn new(sessions: SessionManager) -> Self {
        Self { sessions }
    }

    /// The store requests are applied to.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Checks the request and performs it.
    ///
    /// Checks run in a fixed order and stop at the first failure: method,
    /// id presence and syntax, session existence, guess syntax and range,
    /// and finally whether the session is still active.
    #[instrument(skip(self, request), fields(route = %request.route, method = %request.method))]
    pub fn dispatch(&self, request: &GameRequest) -> Result<GameResponse, DispatchError> {
        if request.method != request.route.method() {
            warn!(expected = %request.route.method(), "Method not allowed");
            return Err(DispatchError::method_not_allowed());
        }

        let response = match request.route {
            Route::New => GameResponse::Created(self.sessions.create_session()),
            Route::IsActive => GameResponse::Active(self.resolve(request)?.is_active()),
            Route::GuessCount => GameResponse::GuessCount(self.resolve(request)?.guess_count()),
            Route::Guess => {
                let session = self.resolve(request)?;
                let body = request.body.as_deref().ok_or_else(|| {
                    warn!("Guess body could not be read");
                    DispatchError::missing_guess()
                })?;
                GameResponse::Outcome(session.submit_guess(body)?)
            }
        };
        Ok(response)
    }

    /// Checks the id is present, then resolves it.
    fn resolve(&self, request: &GameRequest) -> Result<SessionHandle, DispatchError> {
        let raw_id = request
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                warn!("Request without session id");
                DispatchError::missing_identifier()
            })?;
        let session = self.sessions.resolve(raw_id)?;
        debug!(session_id = %session.id(), "Session resolved");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DispatchErrorKind;
    use std::sync::Arc;
    use strictly_guess::{FixedSecret, NoopLogger};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            SessionManager::new()
                .with_secrets(Arc::new(FixedSecret::new(42)))
                .with_logger(Arc::new(NoopLogger)),
        )
    }

    fn request(route: Route, id: Option<&str>, body: Option<&str>) -> GameRequest {
        GameRequest::new(
            route,
            route.method(),
            id.map(str::to_string),
            body.map(str::to_string),
        )
    }

    fn create(dispatcher: &Dispatcher) -> String {
        match dispatcher.dispatch(&request(Route::New, None, None)) {
            Ok(GameResponse::Created(id)) => id.to_string(),
            other => panic!("unexpected {other:?}"),
        }
    }

    fn kind(result: Result<GameResponse, DispatchError>) -> DispatchErrorKind {
        result.expect_err("request should be rejected").kind
    }

    #[test]
    fn method_is_checked_before_anything_else() {
        let d = dispatcher();
        let wrong = GameRequest::new(Route::Guess, Method::GET, None, None);
        assert_eq!(kind(d.dispatch(&wrong)), DispatchErrorKind::MethodNotAllowed);

        let wrong = GameRequest::new(Route::New, Method::POST, None, None);
        assert_eq!(kind(d.dispatch(&wrong)), DispatchErrorKind::MethodNotAllowed);
        assert!(d.sessions().is_empty());
    }

    #[test]
    fn missing_and_empty_ids_are_invalid() {
        let d = dispatcher();
        for id in [None, Some("")] {
            let req = request(Route::IsActive, id, None);
            assert_eq!(kind(d.dispatch(&req)), DispatchErrorKind::InvalidIdentifier);
        }
    }

    #[test]
    fn id_checked_before_guess_body() {
        let d = dispatcher();
        let req = request(Route::Guess, Some("nope"), Some("abc"));
        assert_eq!(kind(d.dispatch(&req)), DispatchErrorKind::InvalidIdentifier);

        let unknown = GameId::new().to_string();
        let req = request(Route::Guess, Some(&unknown), None);
        assert_eq!(kind(d.dispatch(&req)), DispatchErrorKind::NotFound);
    }

    #[test]
    fn unreadable_body_is_an_invalid_guess() {
        let d = dispatcher();
        let id = create(&d);
        let req = request(Route::Guess, Some(&id), None);
        let err = d.dispatch(&req).expect_err("no body");
        assert_eq!(err.kind, DispatchErrorKind::InvalidGuess);
        assert_eq!(err.message, "must provide a guess");
    }

    #[test]
    fn responses_render_as_plain_text() {
        let d = dispatcher();
        let id = create(&d);
        let active = d.dispatch(&request(Route::IsActive, Some(&id), None)).expect("active");
        assert_eq!(active.to_string(), "true");
        let outcome = d
            .dispatch(&request(Route::Guess, Some(&id), Some("99")))
            .expect("guess");
        assert_eq!(outcome.to_string(), "too high");
        let count = d.dispatch(&request(Route::GuessCount, Some(&id), None)).expect("count");
        assert_eq!(count.to_string(), "1");
    }

    #[test]
    fn routes_render_as_paths() {
        assert_eq!(Route::GuessCount.to_string(), "/guesscount");
        assert_eq!(Route::Guess.method(), Method::POST);
    }
}
