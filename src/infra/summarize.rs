//! Short AI summaries of note content.
//!
//! Summaries are best effort: every failure is reported to the user as a
//! readable sentence in place of the summary, never as an error.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const MISSING_KEY_MESSAGE: &str = "API Key eksik. Özetleme yapılamadı.";
pub const EMPTY_SUMMARY_MESSAGE: &str = "Özet oluşturulamadı.";
pub const SERVICE_ERROR_MESSAGE: &str = "Yapay zeka servisine ulaşırken bir hata oluştu.";

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces a short summary of a note's content.
pub trait Summarizer {
    fn summarize(&self, content: &str) -> String;
}

/// Builds the instruction sent along with the note content.
pub fn summary_prompt(content: &str) -> String {
    format!(
        "Aşağıdaki öğrenci notunu akademik ve öz bir dille, madde işaretleri kullanarak 3 cümlede özetle:\n\n\"{content}\""
    )
}

/// Summarizer backed by the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiSummarizer {
    /// Blank keys are treated as missing.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Points requests at a different base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request(&self, api_key: &str, content: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: summary_prompt(content),
                }],
            }],
        };

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let response: GenerateResponse = client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response.text())
    }
}

impl Summarizer for GeminiSummarizer {
    fn summarize(&self, content: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("no API key configured, skipping summary");
            return MISSING_KEY_MESSAGE.to_string();
        };

        debug!(model = %self.model, "requesting summary");
        match self.request(api_key, content) {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("summary response contained no text");
                EMPTY_SUMMARY_MESSAGE.to_string()
            }
            Err(err) => {
                warn!(error = %err, "summary request failed");
                SERVICE_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateResponse {
    /// Text of the first candidate, or `None` if it is blank.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
