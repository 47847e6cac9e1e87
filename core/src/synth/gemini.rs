use super::{AudioPayload, InlineAudio, SpeechBackend, SynthesisRequest};
use crate::config::GeminiConfig;
use crate::{Result, TtsError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

/// Gemini `generateContent` client restricted to audio output.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    cfg: GeminiConfig,
}

impl GeminiClient {
    pub fn new(cfg: GeminiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| {
                TtsError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { http, cfg })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }
}

fn request_body(request: &SynthesisRequest) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": request.text() }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": request.voice() }
                }
            }
        }
    })
}

#[async_trait]
impl SpeechBackend for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &SynthesisRequest) -> Result<InlineAudio> {
        let key = self.cfg.api_key.as_deref().ok_or_else(|| {
            TtsError::ConfigurationError("GOOGLE_API_KEY is not configured".into())
        })?;

        let url = self.endpoint();
        debug!(target: "gemini", url = %url, voice = request.voice(), "POST generateContent");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("Gemini HTTP error: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            error!(target: "gemini", %status, body = %text, "generateContent error");
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| extract_error_message(&v))
                .unwrap_or(text);
            return Err(TtsError::SynthesisFailed(format!(
                "Gemini error: status={} message={}",
                status, message
            )));
        }

        let val: Value = resp.json().await.map_err(|e| {
            TtsError::SynthesisFailed(format!("Failed to parse Gemini JSON: {e}"))
        })?;
        extract_inline_audio(&val).ok_or_else(|| {
            TtsError::SynthesisFailed(
                "Missing candidates[0].content.parts[].inlineData in Gemini response".into(),
            )
        })
    }
}

fn extract_inline_audio(v: &Value) -> Option<InlineAudio> {
    let parts = v
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    parts.iter().find_map(|part| {
        let inline = part.get("inlineData")?;
        let data = inline.get("data")?.as_str()?;
        Some(InlineAudio {
            mime_type: inline
                .get("mimeType")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string()),
            payload: AudioPayload::Base64(data.to_string()),
        })
    })
}

fn extract_error_message(v: &Value) -> Option<String> {
    v.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}
