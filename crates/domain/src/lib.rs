//! Echoes domain - the data model of a narrated interactive-fiction session.
//!
//! Pure types only: no I/O, no async. Persistence and orchestration live in
//! `echoes-engine`.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{GameSession, GameState, SessionLog};
pub use entities::{
    Exit, InteractableObject, Location, Player, DEFAULT_TTS_VOICE, PREF_TTS_SPEED,
    PREF_TTS_VOICE,
};
pub use error::DomainError;
pub use ids::{ClueId, ItemId, LocationId, ObjectId, PlayerId, SessionId};
pub use value_objects::{
    FlagValue, NarrationSpeed, ObjectFlags, ObjectStateTracker, PlayerName, DEFAULT_PLAYER_NAME,
};
