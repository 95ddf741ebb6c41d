//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All collaborator interactions MUST go through this module.
//!
//! The collaborator is an untrusted, best-effort annotator: its output never
//! feeds a store invariant directly, and every call is single-shot with no
//! retry. A failed streaming call delivers one terminal error-marker chunk
//! so the consumer always reaches a terminal state.

pub mod personas;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::AppError;
use self::personas::AssistMode;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEMPERATURE: f32 = 0.7;

/// Terminal chunk delivered in place of content when a streaming call drops
/// mid-flight.
pub const STREAM_ERROR_MARKER: &str = "\n[SYSTEM ERROR: Connection Interrupted]";

/// A single-shot conversation handle: mode-derived system instruction plus
/// model selection. Sessions are created per request and hold no history.
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: AssistMode,
    pub model: &'static str,
    pub system_instruction: &'static str,
}

/// The AI collaborator seam. Carried in `AppState` as `Arc<dyn Collaborator>`
/// so tests can substitute a scripted implementation.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Fails with a configuration error when no credential is available.
    fn create_session(&self, mode: AssistMode) -> Result<Session, AppError>;

    /// Streams response chunks into `tx`. On transport failure the stream
    /// ends with [`STREAM_ERROR_MARKER`] instead of an error return.
    async fn stream_message(&self, session: &Session, prompt: &str, tx: mpsc::Sender<String>);

    /// One-shot call used for JSON-shaped extractions. Returns the raw text;
    /// callers strip fences and parse via [`parse_structured`].
    async fn send_structured(&self, session: &Session, prompt: &str)
        -> Result<String, AppError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: ContentBody<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ContentBody<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    fn text(&self) -> String {
        self.candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

/// The concrete Gemini-backed collaborator.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    fn key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".to_string()))
    }

    fn request_body<'a>(session: &'a Session, prompt: &'a str) -> GeminiRequest<'a> {
        GeminiRequest {
            system_instruction: ContentBody {
                parts: vec![Part {
                    text: session.system_instruction,
                }],
            },
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        }
    }
}

#[async_trait]
impl Collaborator for GeminiClient {
    fn create_session(&self, mode: AssistMode) -> Result<Session, AppError> {
        self.key()?;
        Ok(Session {
            mode,
            model: personas::model_for(mode),
            system_instruction: personas::system_instruction(mode),
        })
    }

    async fn stream_message(&self, session: &Session, prompt: &str, tx: mpsc::Sender<String>) {
        let key = match self.key() {
            Ok(k) => k,
            Err(_) => {
                let _ = tx.send(STREAM_ERROR_MARKER.to_string()).await;
                return;
            }
        };

        let url = format!(
            "{GEMINI_API_BASE}/{}:streamGenerateContent?alt=sse&key={key}",
            session.model
        );
        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(session, prompt))
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!("Streaming call returned {}", r.status());
                let _ = tx.send(STREAM_ERROR_MARKER.to_string()).await;
                return;
            }
            Err(e) => {
                warn!("Streaming call failed: {e}");
                let _ = tx.send(STREAM_ERROR_MARKER.to_string()).await;
                return;
            }
        };

        let mut body = response.bytes_stream();
        let mut buffer = String::new();
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    warn!("Stream dropped mid-flight: {e}");
                    let _ = tx.send(STREAM_ERROR_MARKER.to_string()).await;
                    return;
                }
            };
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // SSE framing: one `data: {json}` payload per line.
            while let Some(newline) = buffer.find('\n') {
                let line = buffer[..newline].trim().to_string();
                buffer.drain(..=newline);
                let Some(payload) = line.strip_prefix("data: ") else {
                    continue;
                };
                if payload == "[DONE]" {
                    return;
                }
                if let Ok(parsed) = serde_json::from_str::<GeminiResponse>(payload) {
                    let text = parsed.text();
                    if !text.is_empty() && tx.send(text).await.is_err() {
                        return; // consumer abandoned the stream
                    }
                }
            }
        }
    }

    async fn send_structured(
        &self,
        session: &Session,
        prompt: &str,
    ) -> Result<String, AppError> {
        let key = self.key()?;
        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={key}",
            session.model
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(session, prompt))
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Gemini call failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!("Gemini returned {status}: {body}")));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Gemini response truncated: {e}")))?;

        let text = parsed.text();
        if text.is_empty() {
            return Err(AppError::Llm("Gemini returned empty content".to_string()));
        }
        debug!("Structured call succeeded ({} chars)", text.len());
        Ok(text)
    }
}

/// Strips fences and deserializes a structured collaborator response.
/// Parse failure is surfaced, never silently defaulted.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let stripped = strip_json_fences(text);
    serde_json::from_str(stripped)
        .map_err(|e| AppError::ExtractionParse(format!("{e}; raw response: {stripped}")))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
