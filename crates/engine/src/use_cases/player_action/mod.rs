//! Player actions: resolve a verb against the current location.
//!
//! Dispatch is pure with respect to persistence. It reads locations (seeding
//! them when needed) and returns the updated session; saving is the session
//! manager's job.

use std::fmt;
use std::sync::Arc;

use echoes_domain::{GameSession, Location, LocationId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::narration::NarrationRules;
use crate::use_cases::world::WorldGraph;

/// Verbs the engine understands. Anything else is kept verbatim as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerVerb {
    Look,
    Examine,
    Move,
    Unknown(String),
}

impl PlayerVerb {
    pub fn parse(raw: &str) -> Self {
        let verb = raw.trim();
        match verb.to_ascii_lowercase().as_str() {
            "look" => Self::Look,
            "examine" => Self::Examine,
            "move" => Self::Move,
            _ => Self::Unknown(verb.to_string()),
        }
    }
}

impl fmt::Display for PlayerVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Look => f.write_str("look"),
            Self::Examine => f.write_str("examine"),
            Self::Move => f.write_str("move"),
            Self::Unknown(verb) => f.write_str(verb),
        }
    }
}

/// Free-form action parameters as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionParams(Map<String, Value>);

impl ActionParams {
    pub fn new(params: Map<String, Value>) -> Self {
        Self(params)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// A parameter as text. Blank strings, nulls and structured values count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for ActionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// The session after an action, and what to tell the player.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub session: GameSession,
    pub narration: String,
}

pub struct ActionDispatcher {
    world: Arc<WorldGraph>,
    rules: Arc<NarrationRules>,
}

impl ActionDispatcher {
    pub fn new(world: Arc<WorldGraph>, rules: Arc<NarrationRules>) -> Self {
        Self { world, rules }
    }

    /// Apply `verb` to `session`.
    ///
    /// Misses (unknown targets, exits or verbs) are narrated, not returned as errors.
    /// Fails only when the current location cannot be resolved or storage fails;
    /// in that case the caller's session is dropped unchanged.
    pub async fn dispatch(
        &self,
        mut session: GameSession,
        verb: &PlayerVerb,
        params: &ActionParams,
    ) -> Result<ActionOutcome, DispatchError> {
        let location_id = session.current_location_id.clone();
        let Some(location) = self.world.ensure_seeded(&location_id).await? else {
            tracing::warn!(
                session_id = %session.session_id,
                location_id = %location_id,
                "Current location cannot be resolved"
            );
            return Err(DispatchError::LocationIntegrity(location_id));
        };

        tracing::debug!(
            session_id = %session.session_id,
            location_id = %location.id,
            verb = %verb,
            "Dispatching player action"
        );

        let narration = match verb {
            PlayerVerb::Look => look(&mut session, &location),
            PlayerVerb::Examine => self.examine(&mut session, &location, params),
            PlayerVerb::Move => self.move_through_exit(&mut session, &location, params).await?,
            PlayerVerb::Unknown(raw) => {
                session.log.record(format!(
                    "Player attempted unknown action: '{}' with params: {}.",
                    raw, params
                ));
                format!("Unknown or unsupported action: '{}'.", raw)
            }
        };

        Ok(ActionOutcome { session, narration })
    }

    fn examine(
        &self,
        session: &mut GameSession,
        location: &Location,
        params: &ActionParams,
    ) -> String {
        let Some(target) = params.text("target") else {
            return "Examine what? Please specify a target.".to_string();
        };

        let Some(object) = location.find_object(&target) else {
            session
                .log
                .record(format!("Player tried to examine non-existent '{}'.", target));
            return format!("You don't see '{}' here to examine.", target);
        };

        let narration =
            self.rules
                .augment(session, &location.id, &object.id, object.examination_text());
        session.log.record(format!(
            "Player examined '{}'. Message: {}",
            object.name, narration
        ));
        narration
    }

    async fn move_through_exit(
        &self,
        session: &mut GameSession,
        location: &Location,
        params: &ActionParams,
    ) -> Result<String, DispatchError> {
        let Some(direction) = params.text("direction") else {
            return Ok("Move where? Please specify a direction.".to_string());
        };

        let Some(exit) = location.find_exit(&direction) else {
            session.log.record(format!(
                "Player tried to move '{}' but there is no such exit.",
                direction
            ));
            return Ok(format!("You can't move {} from here.", direction));
        };

        let Some(destination) = self.world.ensure_seeded(&exit.to_location_id).await? else {
            tracing::debug!(
                session_id = %session.session_id,
                destination = %exit.to_location_id,
                "Exit leads to an unknown location"
            );
            return Ok(format!("The path {} leads to an unknown place.", direction));
        };

        session.move_to(destination.id.clone());
        session.log.record(format!(
            "Moved to {} via {}.",
            destination.name, direction
        ));
        tracing::info!(
            session_id = %session.session_id,
            from = %location.id,
            to = %destination.id,
            "Player moved"
        );

        Ok(format!(
            "You move {}. {}",
            direction, destination.description_template
        ))
    }
}

fn look(session: &mut GameSession, location: &Location) -> String {
    let objects = if location.objects.is_empty() {
        "nothing of note".to_string()
    } else {
        location
            .objects
            .iter()
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let exits = if location.exits.is_empty() {
        "no obvious exits".to_string()
    } else {
        location
            .exits
            .iter()
            .map(|e| format!("{} (to {})", e.direction, e.to_location_id))
            .collect::<Vec<_>>()
            .join(", ")
    };

    session
        .log
        .record(format!("Player looked around {}.", location.name));

    format!(
        "{} You observe: {}. Exits are: {}.",
        location.description_template, objects, exits
    )
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Location {0} cannot be resolved")]
    LocationIntegrity(LocationId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
