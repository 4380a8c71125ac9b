// src/generation/gemini.rs

use crate::error::{Result, TodoError};
use crate::generation::{GenerationRequest, Generator, essay_schema};
use crate::model::Essay;
use crate::validation::essay_from_value;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

// Greedy span from the first `{` to the last `}`, for replies wrapped in code fences.
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("static regex"));

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }
}

impl Generator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, request: &GenerationRequest) -> Result<Essay> {
        let url = self.endpoint(&request.model);
        debug!(%url, prompt_len = request.prompt.len(), "sending generateContent request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(&request.prompt))
            .send()
            .map_err(|e| TodoError::Generation(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TodoError::Generation(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = api_error_message(&body).unwrap_or_else(|| body.trim().to_string());
            warn!(%status, "generateContent returned an error");
            return Err(TodoError::Generation(format!("API error ({status}): {message}")));
        }

        parse_response(&body)
    }
}

/// Body of a `generateContent` call constrained to the essay schema.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": essay_schema()
        }
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}

/// Decodes a successful `generateContent` body into a validated essay.
pub fn parse_response(body: &str) -> Result<Essay> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| TodoError::Generation(format!("Failed to parse JSON: {e}")))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(TodoError::Generation("Response contained no candidates".into()));
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(TodoError::Generation(format!(
            "Model returned no text (finish reason: {reason})"
        )));
    }

    let json = JSON_BLOCK
        .find(&text)
        .map(|m| m.as_str())
        .ok_or_else(|| TodoError::Generation("No JSON object in model output".into()))?;

    debug!(payload_len = json.len(), "extracted structured payload");

    let value: Value = serde_json::from_str(json)
        .map_err(|e| TodoError::Generation(format!("Failed to parse structured output: {e}")))?;

    essay_from_value(value).map_err(TodoError::Generation)
}
