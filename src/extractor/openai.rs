//! OpenAI-backed field extractor.
//!
//! Sends the page's summarized OCR lines to a chat-completions endpoint
//! with a strict JSON schema restricted to the closed field-type set, and
//! runs the returned candidates through the contract filters. Every
//! transport, HTTP, or parse failure degrades to
//! [`Extraction::Unavailable`] with a warning; nothing here propagates an
//! error to the pipeline. The original system issued this call with no
//! timeout; here the client enforces one and a timeout counts as the
//! collaborator being unavailable.

use crate::error::{Error, Result};
use crate::extractor::{
    build_line_summaries, filter_candidates, Extraction, FieldExtractor, LineSummary,
    RawCandidate, MAX_SUMMARY_LINES,
};
use crate::model::Page;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You extract form fields from OCR lines. \
    Return JSON only, matching the schema. \
    Identify labels that correspond to user input fields. \
    Use only these field_type values: text, number, date, email, phone, checkbox, nric.";

/// Configuration for the OpenAI extractor.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// API key; without one the extractor cannot be constructed
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// Request timeout; expiry maps to `Extraction::Unavailable`
    pub timeout: Duration,
    /// Lowercased labels to drop from responses
    pub stop_labels: HashSet<String>,
    /// Cap on OCR lines per request payload
    pub max_lines: usize,
}

impl ExtractorConfig {
    /// Configuration with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            stop_labels: HashSet::new(),
            max_lines: MAX_SUMMARY_LINES,
        }
    }

    /// Read configuration from the environment: `OPENAI_API_KEY`,
    /// `FORMSCAN_LLM_MODEL`, and `FORMSCAN_STOP_LABELS` (pipe-separated).
    /// Returns `None` without an API key.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return None;
        }
        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("FORMSCAN_LLM_MODEL") {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }
        if let Ok(stop) = std::env::var("FORMSCAN_STOP_LABELS") {
            config.stop_labels = parse_stop_labels(&stop);
        }
        Some(config)
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a pipe-separated stop-label list into lowercased entries.
fn parse_stop_labels(raw: &str) -> HashSet<String> {
    raw.split('|')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Field extractor backed by an OpenAI chat-completions endpoint.
pub struct OpenAiExtractor {
    config: ExtractorConfig,
    client: reqwest::blocking::Client,
}

impl OpenAiExtractor {
    /// Build an extractor with an HTTP client honoring the config timeout.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Build from the environment; `Ok(None)` when no API key is set.
    pub fn from_env() -> Result<Option<Self>> {
        match ExtractorConfig::from_env() {
            Some(config) => Ok(Some(Self::new(config)?)),
            None => Ok(None),
        }
    }

    fn request(&self, page: &Page, lines: &[LineSummary]) -> Result<Vec<RawCandidate>> {
        let payload = json!({
            "page": { "width": page.width, "height": page.height },
            "ocr_lines": lines,
        });
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Extract fields from OCR lines as JSON: {payload}"),
                },
            ],
            "response_format": { "type": "json_schema", "json_schema": response_schema() },
            "temperature": 0,
        });

        let response: ChatResponse = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::ExtractorResponse("no choices in response".to_string()))?;

        let parsed: FieldsPayload = serde_json::from_str(&content)?;
        Ok(parsed.fields)
    }
}

impl FieldExtractor for OpenAiExtractor {
    fn extract(&self, page: &Page) -> Extraction {
        let lines = build_line_summaries(page, self.config.max_lines);
        if lines.is_empty() {
            // Reachable collaborator, nothing to ask about.
            return Extraction::Fields(Vec::new());
        }

        match self.request(page, &lines) {
            Ok(raw) => {
                let fields = filter_candidates(page, raw, &self.config.stop_labels);
                debug!(
                    "page {}: extractor returned {} candidates",
                    page.page_index,
                    fields.len()
                );
                Extraction::Fields(fields)
            }
            Err(err) => {
                warn!("external extractor unavailable: {err}");
                Extraction::Unavailable
            }
        }
    }
}

/// Strict response schema: an object with a `fields` array of candidates
/// whose `field_type` is constrained to the closed enumeration.
fn response_schema() -> serde_json::Value {
    json!({
        "name": "form_fields",
        "description": "Extracted form field labels from OCR lines",
        "schema": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "fields": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
                            "label_text": { "type": "string" },
                            "field_type": {
                                "type": "string",
                                "enum": ["checkbox", "date", "email", "nric", "number", "phone", "text"],
                            },
                            "label_bbox": {
                                "type": "array",
                                "items": { "type": "integer" },
                                "minItems": 4,
                                "maxItems": 4,
                            },
                            "required": { "type": "boolean" },
                            "confidence": { "type": "number" },
                        },
                        "required": ["label_text", "field_type", "label_bbox", "required", "confidence"],
                    },
                },
            },
            "required": ["fields"],
        },
        "strict": true,
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FieldsPayload {
    #[serde(default)]
    fields: Vec<RawCandidate>,
}
