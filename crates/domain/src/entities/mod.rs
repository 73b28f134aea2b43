//! Entities - authored templates and the player.

mod location;
mod player;

pub use location::{Exit, InteractableObject, Location};
pub use player::{Player, DEFAULT_TTS_VOICE, PREF_TTS_SPEED, PREF_TTS_VOICE};
