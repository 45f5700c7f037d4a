#![doc = "Gemini `generateContent` client: implements the provider seam over HTTPS with reqwest."]
//!
//! Wire types mirror the public REST contract of the Gemini API. Only the fields
//! this crate reads or writes are modelled; everything else is ignored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::contract::{GenerationProvider, GenerationRequest, ProviderError, ProviderResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig<'a> {
    pub response_mime_type: &'a str,
    pub response_schema: &'a serde_json::Value,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentBody<'a> {
    fn from(req: &'a GenerationRequest) -> Self {
        GenerateContentBody {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: &req.prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: &req.response_mime_type,
                response_schema: &req.response_schema,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, `None` if there are none.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Picks the most useful message out of a non-success response body.
pub fn error_message_from_body(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Provider request failed with status {status}"),
    }
}

/// HTTPS client for the Gemini API. Holds no credential.
///
/// The underlying reqwest client is built on the first request, so a run that
/// stops at the credential check never constructs one.
pub struct GeminiClient {
    http: OnceLock<reqwest::Client>,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        GeminiClient {
            http: OnceLock::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn http(&self) -> Result<&reqwest::Client, ProviderError> {
        if let Some(http) = self.http.get() {
            return Ok(http);
        }
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            error!(error = ?e, "Failed to build HTTP client");
            ProviderError::new(e.to_string())
        })?;
        debug!(timeout = ?self.timeout, "HTTP client built");
        Ok(self.http.get_or_init(move || http))
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        GeminiClient::new(DEFAULT_BASE_URL, None)
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = self.endpoint(&request.model);
        info!(model = %request.model, prompt_len = request.prompt.len(), "Sending generateContent request");

        let resp = self
            .http()?
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentBody::from(request))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "generateContent request failed to send");
                ProviderError::new(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            error!(error = ?e, status = %status, "Failed to read generateContent response body");
            ProviderError {
                status: Some(status.as_u16()),
                message: e.to_string(),
            }
        })?;

        if !status.is_success() {
            let message = error_message_from_body(status, &body);
            error!(status = %status, message = %message, "Provider returned an error");
            return Err(ProviderError {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, "generateContent response envelope is not valid JSON");
            ProviderError {
                status: Some(status.as_u16()),
                message: format!("Unreadable provider response: {e}"),
            }
        })?;

        let text = parsed.text();
        info!(status = %status, has_text = text.is_some(), "generateContent response received");
        Ok(ProviderResponse { text })
    }
}
