//! Turning narration text into audio.

use std::sync::Arc;

use echoes_domain::SessionId;

use crate::infrastructure::ports::{AudioError, NarrationAudioPort, RepoError, VoiceSettings};
use crate::repositories::SessionRepository;

/// Synthesize narration, voiced with the session player's preferences when a session is given.
pub struct NarrateText {
    audio: Arc<dyn NarrationAudioPort>,
    sessions: Arc<SessionRepository>,
}

impl NarrateText {
    pub fn new(audio: Arc<dyn NarrationAudioPort>, sessions: Arc<SessionRepository>) -> Self {
        Self { audio, sessions }
    }

    pub async fn execute(
        &self,
        text: &str,
        session_id: Option<SessionId>,
    ) -> Result<Vec<u8>, NarrateError> {
        if text.trim().is_empty() {
            return Err(AudioError::EmptyText.into());
        }

        let voice = match session_id {
            Some(id) => {
                let session = self
                    .sessions
                    .get(id)
                    .await?
                    .ok_or(NarrateError::SessionNotFound(id))?;
                VoiceSettings::for_player(&session.player)
            }
            None => VoiceSettings::default(),
        };

        Ok(self.audio.synthesize(text, &voice).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NarrateError {
    #[error("Game session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
