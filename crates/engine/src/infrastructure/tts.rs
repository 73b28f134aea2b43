//! Speech synthesis client for narration audio.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::infrastructure::ports::{AudioError, NarrationAudioPort, VoiceSettings};

/// Default request timeout for synthesis calls.
pub const DEFAULT_TTS_TIMEOUT_SECS: u64 = 30;

/// Client for an HTTP speech synthesis service.
///
/// Posts `{text, voice, speaking_rate, pitch, audio_encoding}` to
/// `{base_url}/v1/synthesize` and returns the raw response body.
#[derive(Clone)]
pub struct HttpNarrationAudio {
    client: Client,
    base_url: String,
}

impl HttpNarrationAudio {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/synthesize", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice: &'a str,
    speaking_rate: f32,
    pitch: f32,
    audio_encoding: &'a str,
}

#[async_trait]
impl NarrationAudioPort for HttpNarrationAudio {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>, AudioError> {
        if text.trim().is_empty() {
            return Err(AudioError::EmptyText);
        }

        let request = SynthesizeRequest {
            text,
            voice: &voice.voice,
            speaking_rate: voice.speaking_rate,
            pitch: voice.pitch,
            audio_encoding: &voice.audio_encoding,
        };

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AudioError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AudioError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::RequestFailed(e.to_string()))?;

        tracing::debug!(bytes = bytes.len(), voice = %voice.voice, "Synthesized narration audio");
        Ok(bytes.to_vec())
    }
}

/// Stand-in used when no synthesis service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrationAudio;

#[async_trait]
impl NarrationAudioPort for DisabledNarrationAudio {
    async fn synthesize(&self, _text: &str, _voice: &VoiceSettings) -> Result<Vec<u8>, AudioError> {
        Err(AudioError::Unavailable)
    }
}
