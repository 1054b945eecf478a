//! Session store: every live game, addressable by id.

use crate::DispatchError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};
use strictly_guess::{
    Game, GameId, GameLogger, GuessOutcome, GuessRange, SecretSource, ThreadSecrets, TracingLogger,
};
use tracing::{debug, info, instrument, warn};

/// A game plus the bookkeeping the store needs for eviction.
#[derive(Debug)]
struct Session {
    game: Game,
    last_activity: Instant,
}

/// Shared handle to one stored game.
///
/// Every access goes through the game's own lock, so operations on one
/// session are serialized while other sessions proceed independently.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: GameId,
    session: Arc<Mutex<Session>>,
}

impl SessionHandle {
    fn new(game: Game) -> Self {
        Self {
            id: game.id(),
            session: Arc::new(Mutex::new(Session {
                game,
                last_activity: Instant::now(),
            })),
        }
    }

    /// Locks the session and marks it as recently used.
    fn touch(&self) -> MutexGuard<'_, Session> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        session.last_activity = Instant::now();
        session
    }

    fn idle_for(&self) -> Duration {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_activity
            .elapsed()
    }

    /// The session's id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Whether the game still accepts guesses.
    pub fn is_active(&self) -> bool {
        self.touch().game.is_active()
    }

    /// Guesses evaluated so far.
    pub fn guess_count(&self) -> u32 {
        self.touch().game.guess_count()
    }

    /// The game's guess range.
    pub fn range(&self) -> GuessRange {
        self.touch().game.range()
    }

    /// Parses and applies a guess while holding the game's lock.
    ///
    /// A malformed or out-of-range guess is rejected before the active check,
    /// and neither rejection changes the game.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn submit_guess(&self, raw_guess: &str) -> Result<GuessOutcome, DispatchError> {
        let mut session = self.touch();
        let game = &mut session.game;

        let guess = game.range().parse_guess(raw_guess.trim()).ok_or_else(|| {
            warn!(raw_guess, range = %game.range(), "Rejected malformed guess");
            DispatchError::invalid_guess()
        })?;

        if !game.is_active() {
            warn!(guess, "Rejected guess against finished game");
            return Err(DispatchError::rejected_inactive());
        }

        game.evaluate_guess(guess)
            .map_err(|_| DispatchError::rejected_inactive())
    }
}

/// Owns every live game.
///
/// Cloning is cheap and shares the same map. The map sits behind a
/// read-write lock so lookups run concurrently. The map lock is never
/// requested while a game lock is held.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<GameId, SessionHandle>>>,
    range: GuessRange,
    secrets: Arc<dyn SecretSource>,
    logger: Arc<dyn GameLogger>,
}

impl SessionManager {
    /// Creates an empty store using the default range, random secrets and
    /// `tracing` for game events.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            range: GuessRange::default(),
            secrets: Arc::new(ThreadSecrets),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Range used for new sessions.
    pub fn with_range(mut self, range: GuessRange) -> Self {
        self.range = range;
        self
    }

    /// Secret source used for new sessions.
    pub fn with_secrets(mut self, secrets: Arc<dyn SecretSource>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Logger handed to new sessions.
    pub fn with_logger(mut self, logger: Arc<dyn GameLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Range used for new sessions.
    pub fn range(&self) -> GuessRange {
        self.range
    }

    /// Creates a game and stores it under its fresh id.
    #[instrument(skip(self))]
    pub fn create_session(&self) -> GameId {
        loop {
            let game = Game::new(self.range, self.secrets.as_ref(), Arc::clone(&self.logger));
            let id = game.id();
            let mut sessions = self.write();
            match sessions.entry(id) {
                Entry::Vacant(slot) => {
                    slot.insert(SessionHandle::new(game));
                    info!(session_id = %id, sessions = sessions.len(), "Created new session");
                    return id;
                }
                Entry::Occupied(_) => warn!(session_id = %id, "Id collision, regenerating"),
            }
        }
    }

    /// Looks up a session by its already-parsed id.
    #[instrument(skip(self))]
    pub fn get(&self, id: GameId) -> Option<SessionHandle> {
        let session = self.read().get(&id).cloned();
        if session.is_none() {
            debug!(session_id = %id, "Session not found");
        }
        session
    }

    /// Resolves raw id text to a session.
    ///
    /// Text that is not a hyphenated UUID is an invalid identifier; a valid
    /// id with no session is not found.
    #[instrument(skip(self))]
    pub fn resolve(&self, raw_id: &str) -> Result<SessionHandle, DispatchError> {
        let id = GameId::parse(raw_id).map_err(|e| {
            debug!(error = %e, "Rejected malformed session id");
            DispatchError::invalid_identifier()
        })?;
        self.get(id).ok_or_else(DispatchError::not_found)
    }

    /// Whether the session still accepts guesses.
    pub fn query_active(&self, raw_id: &str) -> Result<bool, DispatchError> {
        Ok(self.resolve(raw_id)?.is_active())
    }

    /// Guesses evaluated so far in the session.
    pub fn query_guess_count(&self, raw_id: &str) -> Result<u32, DispatchError> {
        Ok(self.resolve(raw_id)?.guess_count())
    }

    /// Resolves the session, then parses and applies the guess.
    pub fn submit_guess(&self, raw_id: &str, raw_guess: &str) -> Result<GuessOutcome, DispatchError> {
        self.resolve(raw_id)?.submit_guess(raw_guess)
    }

    /// Ids of every stored session.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<GameId> {
        let ids: Vec<_> = self.read().keys().copied().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drops sessions untouched for longer than `ttl`, returning how many went.
    #[instrument(skip(self))]
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() <= ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<GameId, SessionHandle>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<GameId, SessionHandle>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("sessions", &self.len())
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}
