/// LLM Client: the single point of entry for all Gemini calls in the coach.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers hold an `Arc<dyn Generator>` so flows can be exercised with a scripted fake.
///
/// One request per user action. Failures are surfaced as-is; nothing here retries.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 2000;

/// User-facing text for a call attempted without any credential.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "No API key configured. Please add GEMINI_API_KEY \
    to your environment or enter it for this session.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("No response generated")]
    EmptyContent,
}

impl GenerationError {
    /// Renders the error the way it is shown to the user: prefixed with `Error:`.
    pub fn sentinel(&self) -> String {
        format!("Error: {self}")
    }
}

/// A text generator. `GeminiClient` in production, scripted fakes in tests.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Sends one prompt with an optional system instruction and returns the generated text.
    /// `api_key` is the already-resolved credential; `None` fails before any request.
    async fn generate(
        &self,
        api_key: Option<&str>,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, GenerationError>;

    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
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
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Wraps the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    model: String,
}

impl GeminiClient {
    pub fn new(model: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            model,
        })
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(
        &self,
        api_key: Option<&str>,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, GenerationError> {
        let api_key = api_key.ok_or(GenerationError::MissingCredential)?;

        let full_prompt = join_system(prompt, system);
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &full_prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        debug!(
            "Gemini call: model={}, prompt_chars={}",
            self.model,
            full_prompt.len()
        );

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{}:generateContent", self.model))
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body);
            warn!("Gemini API returned {status}: {message}");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        extract_text(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// The system instruction is prepended to the prompt, separated by a blank line.
fn join_system(prompt: &str, system: Option<&str>) -> String {
    match system {
        Some(system) => format!("{system}\n\n{prompt}"),
        None => prompt.to_string(),
    }
}

/// Joins every text part of the first candidate, in order.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;

    let text: String = parsed
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyContent);
    }
    Ok(text)
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiError>(body)
        .ok()
        .and_then(|e| match (e.error.status, e.error.message) {
            (Some(status), Some(message)) => Some(format!("{status}: {message}")),
            (None, Some(message)) => Some(message),
            (Some(status), None) => Some(status),
            (None, None) => None,
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
pub mod testing {
    //! Scripted generator shared by the flow tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays queued responses in order and records every prompt it receives.
    #[derive(Default)]
    pub struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String, GenerationError>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn replying(responses: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(text: &str) -> Self {
            Self::replying(vec![Ok(text.to_string())])
        }

        pub fn failing(error: GenerationError) -> Self {
            Self::replying(vec![Err(error)])
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(
            &self,
            api_key: Option<&str>,
            prompt: &str,
            _system: Option<&str>,
        ) -> Result<String, GenerationError> {
            api_key.ok_or(GenerationError::MissingCredential)?;
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GenerationError::EmptyContent))
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }
}
