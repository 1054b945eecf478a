//! Multi-session HTTP server for the guessing game.
//!
//! # Architecture
//!
//! - **Session store**: [`SessionManager`] maps [`GameId`](strictly_guess::GameId)s to
//!   individually locked games
//! - **Dispatch**: [`Dispatcher`] validates each [`GameRequest`] in a fixed order
//!   and applies it to the right game
//! - **HTTP**: [`router`] exposes `/new`, `/isactive`, `/guesscount` and `/guess`
//! - **Eviction**: optional removal of idle sessions, see [`spawn_idle_sweeper`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod dispatcher;
mod error;
mod eviction;
mod routes;
mod session;

pub use config::{ConfigError, ServerConfig};
pub use dispatcher::{Dispatcher, GameRequest, GameResponse, Route};
pub use error::{DispatchError, DispatchErrorKind};
pub use eviction::spawn_idle_sweeper;
pub use routes::{router, serve};
pub use session::{SessionHandle, SessionManager};
