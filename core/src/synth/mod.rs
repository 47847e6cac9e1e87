//! Speech synthesis adapter.
//!
//! [`Synthesizer`] validates a request against the voice catalog, makes exactly
//! one call to a [`SpeechBackend`], and turns the returned inline payload into
//! a [`PcmAudioBuffer`]. Failures are never retried.

pub mod gemini;

use crate::audio::{PcmAudioBuffer, PcmFormat};
use crate::{voices, Result, TtsError};
use async_trait::async_trait;
use base64::Engine as _;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Validated text + voice pair. Construct through [`SynthesisRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    voice: &'static str,
    text: String,
}

impl SynthesisRequest {
    pub fn new(voice: &str, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let voice = voices::find(voice)
            .ok_or_else(|| TtsError::InvalidArgument(format!("Unknown voice: '{}'", voice)))?;
        // whitespace-only counts as empty
        if text.trim().is_empty() {
            return Err(TtsError::InvalidArgument("Text must not be empty".into()));
        }
        Ok(Self {
            voice: voice.name,
            text,
        })
    }

    pub fn voice(&self) -> &'static str {
        self.voice
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Audio bytes as carried by the remote response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPayload {
    /// Base64 text, as found in JSON responses.
    Base64(String),
    Raw(Vec<u8>),
}

/// The audio part of a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAudio {
    pub mime_type: Option<String>,
    pub payload: AudioPayload,
}

/// A remote capability that turns a request into inline audio.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &SynthesisRequest) -> Result<InlineAudio>;
}

#[derive(Clone)]
pub struct Synthesizer {
    backend: Arc<dyn SpeechBackend>,
}

impl Synthesizer {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Contract:
    /// - Input: a catalog voice name and non-empty text
    /// - Output: raw PCM with the format the backend reported (or the default)
    /// - Error: `InvalidArgument` before any remote call, `ConfigurationError`
    ///   for a missing credential, `SynthesisFailed` for everything remote
    pub async fn synthesize(&self, voice: &str, text: &str) -> Result<PcmAudioBuffer> {
        let request = SynthesisRequest::new(voice, text)?;
        self.synthesize_request(&request).await
    }

    pub async fn synthesize_request(&self, request: &SynthesisRequest) -> Result<PcmAudioBuffer> {
        let started = Instant::now();
        let inline = self.backend.generate(request).await.map_err(|e| match e {
            TtsError::ConfigurationError(_) | TtsError::SynthesisFailed(_) => e,
            other => TtsError::SynthesisFailed(other.to_string()),
        })?;

        let format = resolve_format(inline.mime_type.as_deref());
        let data = decode_payload(inline.payload)?;

        let buffer = PcmAudioBuffer::new(format, data);
        info!(
            target: "synth",
            backend = self.backend.name(),
            voice = request.voice(),
            chars = request.text().chars().count(),
            bytes = buffer.data.len(),
            sample_rate = format.sample_rate_hz,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Synthesized speech"
        );
        Ok(buffer)
    }
}

fn resolve_format(mime: Option<&str>) -> PcmFormat {
    match mime {
        Some(m) => PcmFormat::from_mime_type(m).unwrap_or_else(|| {
            warn!(target: "synth", mime_type = m, "Unrecognized audio MIME type; assuming 24 kHz mono 16-bit PCM");
            PcmFormat::default()
        }),
        None => PcmFormat::default(),
    }
}

fn decode_payload(payload: AudioPayload) -> Result<Vec<u8>> {
    let data = match payload {
        AudioPayload::Raw(bytes) => bytes,
        AudioPayload::Base64(text) => base64::engine::general_purpose::STANDARD
            .decode(text.trim())
            .map_err(|e| TtsError::SynthesisFailed(format!("Invalid base64 audio payload: {e}")))?,
    };
    if data.is_empty() {
        return Err(TtsError::SynthesisFailed("Empty audio payload".into()));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validation() {
        assert!(SynthesisRequest::new("Kore", "Hello").is_ok());
        assert!(matches!(
            SynthesisRequest::new("Nobody", "Hello"),
            Err(TtsError::InvalidArgument(_))
        ));
        assert!(matches!(
            SynthesisRequest::new("Kore", "   "),
            Err(TtsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn decode_base64_and_raw() {
        let decoded = decode_payload(AudioPayload::Base64("AAEC".into())).unwrap();
        assert_eq!(decoded, vec![0, 1, 2]);
        let raw = decode_payload(AudioPayload::Raw(vec![9, 9])).unwrap();
        assert_eq!(raw, vec![9, 9]);
    }

    #[test]
    fn decode_rejects_garbage_and_empty() {
        assert!(matches!(
            decode_payload(AudioPayload::Base64("not base64!".into())),
            Err(TtsError::SynthesisFailed(_))
        ));
        assert!(matches!(
            decode_payload(AudioPayload::Raw(vec![])),
            Err(TtsError::SynthesisFailed(_))
        ));
    }

    #[test]
    fn format_falls_back_to_default() {
        assert_eq!(resolve_format(None), PcmFormat::default());
        assert_eq!(resolve_format(Some("audio/mpeg")), PcmFormat::default());
        assert_eq!(
            resolve_format(Some("audio/L16;codec=pcm;rate=16000")),
            PcmFormat::new(1, 16_000, 16)
        );
    }
}
