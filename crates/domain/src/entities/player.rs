//! Player entity - the person behind a game session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::value_objects::{NarrationSpeed, PlayerName};

/// Preference key for the speech-synthesis voice
pub const PREF_TTS_VOICE: &str = "tts_voice";
/// Preference key for the narration speed (`slow`, `normal`, `fast`)
pub const PREF_TTS_SPEED: &str = "tts_speed";
/// Voice used when the player has not picked one
pub const DEFAULT_TTS_VOICE: &str = "en-US-Standard-C";

/// A player, embedded in exactly one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    /// Free-form preferences, mostly narration-voice settings.
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
}

impl Player {
    /// Create a player with default narration preferences.
    pub fn new(id: PlayerId, name: PlayerName) -> Self {
        let mut preferences = BTreeMap::new();
        preferences.insert(PREF_TTS_VOICE.to_string(), DEFAULT_TTS_VOICE.to_string());
        preferences.insert(
            PREF_TTS_SPEED.to_string(),
            NarrationSpeed::default().to_string(),
        );
        Self {
            id,
            name,
            preferences,
        }
    }

    pub fn preference(&self, key: &str) -> Option<&str> {
        self.preferences.get(key).map(String::as_str)
    }

    pub fn set_preference(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.preferences.insert(key.into(), value.into());
    }

    pub fn narration_voice(&self) -> &str {
        self.preference(PREF_TTS_VOICE).unwrap_or(DEFAULT_TTS_VOICE)
    }

    /// Unparseable speed preferences fall back to normal speed.
    pub fn narration_speed(&self) -> NarrationSpeed {
        self.preference(PREF_TTS_SPEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_default_narration_preferences() {
        let player = Player::new(PlayerId::new(), PlayerName::default());
        assert_eq!(player.narration_voice(), DEFAULT_TTS_VOICE);
        assert_eq!(player.narration_speed(), NarrationSpeed::Normal);
        assert_eq!(player.preference(PREF_TTS_SPEED), Some("normal"));
    }

    #[test]
    fn garbage_speed_preference_falls_back_to_normal() {
        let mut player = Player::new(PlayerId::new(), PlayerName::default());
        player.set_preference(PREF_TTS_SPEED, "warp");
        assert_eq!(player.narration_speed(), NarrationSpeed::Normal);

        player.set_preference(PREF_TTS_SPEED, "fast");
        assert_eq!(player.narration_speed(), NarrationSpeed::Fast);
    }
}
