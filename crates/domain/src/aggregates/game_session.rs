//! GameSession aggregate - one player's in-progress game.
//!
//! # Invariants
//!
//! - `session_id` never changes after creation
//! - `log` is append-only; entries are kept in the order they happened
//! - `last_updated` strictly increases every time the session is stamped
//! - every location the player has stood in has an object-state entry

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Location, Player};
use crate::ids::{ClueId, ItemId, LocationId, SessionId};
use crate::value_objects::ObjectStateTracker;

/// Append-only, ordered narration log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog(Vec<String>);

impl SessionLog {
    pub fn record(&mut self, entry: impl Into<String>) {
        self.0.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Story progress carried by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Names of story beats that have happened, in order
    #[serde(default)]
    pub story_events: Vec<String>,
    #[serde(default)]
    pub current_puzzle: Option<String>,
    #[serde(default)]
    pub object_states: ObjectStateTracker,
}

/// A persisted game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: SessionId,
    pub player: Player,
    pub current_location_id: LocationId,
    #[serde(default)]
    pub game_state: GameState,
    #[serde(default)]
    pub inventory: Vec<ItemId>,
    #[serde(default)]
    pub discovered_clues: Vec<ClueId>,
    #[serde(default)]
    pub log: SessionLog,
    pub last_updated: DateTime<Utc>,
}

impl GameSession {
    /// Start a new session with the player standing in `start`.
    pub fn start(
        session_id: SessionId,
        player: Player,
        start: &Location,
        now: DateTime<Utc>,
    ) -> Self {
        let mut game_state = GameState::default();
        game_state.object_states.ensure_location(&start.id);

        let mut log = SessionLog::default();
        log.record(format!(
            "Game started for {} at {} in {}.",
            player.name,
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
            start.name
        ));

        Self {
            session_id,
            player,
            current_location_id: start.id.clone(),
            game_state,
            inventory: Vec::new(),
            discovered_clues: Vec::new(),
            log,
            last_updated: now,
        }
    }

    /// Advance `last_updated`.
    ///
    /// A clock that stalls or steps backwards still yields a strictly later
    /// timestamp (previous value plus one microsecond).
    pub fn stamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_updated = if now > self.last_updated {
            now
        } else {
            self.last_updated + Duration::microseconds(1)
        };
        self.last_updated
    }

    /// Relocate the player, making sure the destination has an object-state entry.
    pub fn move_to(&mut self, destination: LocationId) {
        self.game_state.object_states.ensure_location(&destination);
        self.current_location_id = destination;
    }

    pub fn record_story_event(&mut self, event: impl Into<String>) {
        self.game_state.story_events.push(event.into());
    }

    pub fn object_states(&self) -> &ObjectStateTracker {
        &self.game_state.object_states
    }

    pub fn object_states_mut(&mut self) -> &mut ObjectStateTracker {
        &mut self.game_state.object_states
    }
}
