//! Aggregates - consistency boundaries persisted as whole documents.

mod game_session;

pub use game_session::{GameSession, GameState, SessionLog};
