//! Session identifiers.

use std::str::FromStr;
use tracing::instrument;
use uuid::Uuid;

/// Length of the canonical hyphenated UUID text form.
const HYPHENATED_LEN: usize = 36;

/// Unique identifier of a game, rendered as a hyphenated UUID.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_more::From,
)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form.
    ///
    /// The simple, braced and URN spellings that [`Uuid`] also understands
    /// are rejected.
    #[instrument]
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        if raw.len() != HYPHENATED_LEN {
            return Err(IdError::Malformed {
                raw: raw.to_string(),
            });
        }
        Uuid::try_parse(raw).map(Self).map_err(|_| IdError::Malformed {
            raw: raw.to_string(),
        })
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error parsing a [`GameId`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IdError {
    /// The text is not a hyphenated UUID.
    #[display("invalid game id: {raw:?}")]
    Malformed {
        /// The rejected input.
        raw: String,
    },
}

impl std::error::Error for IdError {}
