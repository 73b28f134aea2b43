//! Stateful narration rules attached to specific objects.
//!
//! Examining an object normally narrates its description. A rule registered for
//! a `(location, object)` pair may extend that narration and record progress in
//! the session's object state.

use std::collections::BTreeMap;

use echoes_domain::{ClueId, GameSession, LocationId, ObjectId};

use super::world::STARTING_LOCATION_ID;

/// Flag set on the study desk once its drawer has been found.
pub const DRAWER_FOUND_FLAG: &str = "drawer_found";

/// Story event recorded when the desk drawer is found.
pub const DESK_DRAWER_FOUND_EVENT: &str = "desk_drawer_found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationRule {
    /// Reveal something the first time the object is examined, then narrate the memory of it.
    RevealOnce {
        flag: String,
        first_time: String,
        repeat: String,
        story_event: Option<String>,
        clue: Option<ClueId>,
    },
}

impl NarrationRule {
    /// Apply the rule to `session`, returning the text to append to the narration.
    pub fn apply(
        &self,
        session: &mut GameSession,
        location: &LocationId,
        object: &ObjectId,
    ) -> String {
        match self {
            Self::RevealOnce {
                flag,
                first_time,
                repeat,
                story_event,
                clue,
            } => {
                if session.object_states().flag_is_set(location, object, flag) {
                    return repeat.clone();
                }

                session.object_states_mut().set_flag(location, object, flag.as_str());
                if let Some(event) = story_event {
                    session.record_story_event(event.as_str());
                }
                if let Some(clue) = clue {
                    if !session.discovered_clues.contains(clue) {
                        session.discovered_clues.push(clue.clone());
                    }
                }
                first_time.clone()
            }
        }
    }
}

/// Registry of narration rules keyed by `(location, object)`.
#[derive(Debug, Clone, Default)]
pub struct NarrationRules {
    rules: BTreeMap<(LocationId, ObjectId), NarrationRule>,
}

impl NarrationRules {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rules for the built-in study.
    pub fn builtin() -> Self {
        Self::empty().with_rule(
            STARTING_LOCATION_ID,
            "desk",
            NarrationRule::RevealOnce {
                flag: DRAWER_FOUND_FLAG.to_string(),
                first_time: " As you run your hands along the underside, you discover a small, \
                             almost invisible drawer!"
                    .to_string(),
                repeat: " You remember finding the hidden drawer earlier. It's currently closed."
                    .to_string(),
                story_event: Some(DESK_DRAWER_FOUND_EVENT.to_string()),
                clue: None,
            },
        )
    }

    /// Register a rule, replacing any previous rule for the same pair.
    pub fn register(
        &mut self,
        location: impl Into<LocationId>,
        object: impl Into<ObjectId>,
        rule: NarrationRule,
    ) {
        self.rules.insert((location.into(), object.into()), rule);
    }

    pub fn with_rule(
        mut self,
        location: impl Into<LocationId>,
        object: impl Into<ObjectId>,
        rule: NarrationRule,
    ) -> Self {
        self.register(location, object, rule);
        self
    }

    pub fn rule_for(&self, location: &LocationId, object: &ObjectId) -> Option<&NarrationRule> {
        self.rules.get(&(location.clone(), object.clone()))
    }

    /// Extend `base` with whatever the matching rule contributes.
    ///
    /// Objects without a rule narrate `base` unchanged and leave the session untouched.
    pub fn augment(
        &self,
        session: &mut GameSession,
        location: &LocationId,
        object: &ObjectId,
        base: &str,
    ) -> String {
        match self.rule_for(location, object) {
            Some(rule) => {
                let extra = rule.apply(session, location, object);
                format!("{}{}", base, extra)
            }
            None => base.to_string(),
        }
    }
}
