//! Minimal Gemini REST client.
//!
//! Only the two endpoints podgen needs: `generateContent` (text and audio)
//! and `countTokens`. Each call is a single attempt; retries are layered on
//! top with [`crate::retry`].

use crate::config::{GeminiSettings, SpeakerVoice};
use crate::error::{PodgenError, Result};
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default timeout for Gemini API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variables checked for an API key, in order.
pub const API_KEY_VARS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY", "GCP_API_KEY"];

/// Create an HTTP client with the given request timeout.
pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("podgen/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?)
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the public endpoint with the default timeout.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_settings(api_key, &GeminiSettings::default())
    }

    /// Create a client from configuration.
    pub fn with_settings(api_key: String, settings: &GeminiSettings) -> Result<Self> {
        let timeout = if settings.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            settings.timeout_secs
        };
        Ok(Self {
            http: create_http_client(Duration::from_secs(timeout))?,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// POST a JSON body and return the parsed JSON response.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PodgenError::Api {
                status: status.as_u16(),
                message: api_error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
            });
        }

        response.json().await.map_err(map_transport_error)
    }

    /// Call `generateContent` with a raw request body.
    #[instrument(skip(self, body))]
    pub async fn generate_content(&self, model: &str, body: &Value) -> Result<Value> {
        self.post_json(&self.endpoint(model, "generateContent"), body).await
    }

    /// Generate text for a single user prompt.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        let response = self.generate_content(model, &text_request_body(prompt)).await?;
        extract_first_text(&response)
            .map(str::to_string)
            .ok_or_else(|| PodgenError::MalformedResponse("no text in generateContent response".into()))
    }

    /// Count the input tokens of `text` for `model`.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn count_tokens(&self, model: &str, text: &str) -> Result<u32> {
        let body = json!({ "contents": [user_content(text)] });
        let response = self.post_json(&self.endpoint(model, "countTokens"), &body).await?;

        let total = response
            .get("totalTokens")
            .and_then(Value::as_u64)
            .ok_or_else(|| PodgenError::MalformedResponse("countTokens response missing totalTokens".into()))?;

        debug!("Counted {} tokens", total);
        u32::try_from(total)
            .map_err(|_| PodgenError::MalformedResponse(format!("token count out of range: {}", total)))
    }
}

fn map_transport_error(e: reqwest::Error) -> PodgenError {
    if e.is_timeout() {
        PodgenError::Timeout(e.to_string())
    } else if e.is_connect() {
        PodgenError::Network(e.to_string())
    } else {
        PodgenError::Http(e)
    }
}

/// Pull `error.message` out of a Gemini error body.
fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn user_content(text: &str) -> Value {
    json!({ "role": "user", "parts": [ { "text": text } ] })
}

/// Request body for plain text generation.
pub fn text_request_body(prompt: &str) -> Value {
    json!({ "contents": [user_content(prompt)] })
}

/// Request body for multi-speaker speech synthesis.
pub fn speech_request_body(text: &str, voices: &[SpeakerVoice]) -> Value {
    let speaker_voice_configs: Vec<Value> = voices
        .iter()
        .map(|v| {
            json!({
                "speaker": v.speaker,
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": v.voice }
                }
            })
        })
        .collect();

    json!({
        "contents": [user_content(text)],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "multiSpeakerVoiceConfig": {
                    "speakerVoiceConfigs": speaker_voice_configs
                }
            }
        }
    })
}

/// First non-empty text part of the first candidate that has one.
pub fn extract_first_text(v: &Value) -> Option<&str> {
    let candidates = v.get("candidates")?.as_array()?;
    for c in candidates {
        let Some(parts) = c.pointer("/content/parts").and_then(Value::as_array) else {
            continue;
        };
        for p in parts {
            if let Some(t) = p.get("text").and_then(Value::as_str) {
                if !t.is_empty() {
                    return Some(t);
                }
            }
        }
    }
    None
}

/// Base64 audio payload at `candidates[0].content.parts[0].inlineData.data`.
///
/// The snake_case spelling used by some API versions is accepted too.
pub fn extract_inline_audio(v: &Value) -> Result<&str> {
    let part = v
        .pointer("/candidates/0/content/parts/0")
        .ok_or_else(|| PodgenError::MalformedResponse("missing candidates[0].content.parts[0]".into()))?;

    part.get("inlineData")
        .or_else(|| part.get("inline_data"))
        .and_then(|inline| inline.get("data"))
        .and_then(Value::as_str)
        .ok_or_else(|| PodgenError::MalformedResponse("missing inlineData.data".into()))
}
