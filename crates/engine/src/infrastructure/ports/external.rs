//! External service ports (narration audio).

use async_trait::async_trait;
use echoes_domain::Player;
use serde::Serialize;

use super::error::AudioError;

/// Encoding requested from speech synthesis.
pub const DEFAULT_AUDIO_ENCODING: &str = "MP3";

/// How a narration should be voiced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub voice: String,
    pub speaking_rate: f32,
    pub pitch: f32,
    pub audio_encoding: String,
}

impl VoiceSettings {
    /// Voice settings derived from a player's narration preferences.
    pub fn for_player(player: &Player) -> Self {
        Self {
            voice: player.narration_voice().to_string(),
            speaking_rate: player.narration_speed().speaking_rate(),
            ..Self::default()
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: echoes_domain::DEFAULT_TTS_VOICE.to_string(),
            speaking_rate: 1.0,
            pitch: 0.0,
            audio_encoding: DEFAULT_AUDIO_ENCODING.to_string(),
        }
    }
}

/// Turns narration text into audio bytes. The engine does not inspect the encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NarrationAudioPort: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>, AudioError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use echoes_domain::{PlayerId, PlayerName, PREF_TTS_SPEED, PREF_TTS_VOICE};

    #[test]
    fn voice_settings_follow_player_preferences() {
        let mut player = Player::new(PlayerId::new(), PlayerName::default());
        player.set_preference(PREF_TTS_VOICE, "en-GB-Wavenet-B");
        player.set_preference(PREF_TTS_SPEED, "slow");

        let settings = VoiceSettings::for_player(&player);
        assert_eq!(settings.voice, "en-GB-Wavenet-B");
        assert_eq!(settings.speaking_rate, 0.75);
        assert_eq!(settings.audio_encoding, DEFAULT_AUDIO_ENCODING);
    }
}
