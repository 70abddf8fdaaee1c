use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::{debug, error};

use crate::analysis::RawCitation;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for interacting with the Generative Language API
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model identifier, part of the request path
    model: String,
}

impl std::fmt::Debug for Gemini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gemini")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    contents: Vec<GeminiContent>,

    /// Tools made available to the model
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,

    /// Sampling configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// One conversation turn
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Role of the turn author (user, model)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single content part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text of the part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Set on reasoning parts, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

/// Tool declaration
#[derive(Debug, Serialize)]
pub struct GeminiTool {
    #[serde(rename = "google_search", skip_serializing_if = "Option::is_none")]
    google_search: Option<GoogleSearch>,
}

/// Google Search grounding tool (no options)
#[derive(Debug, Serialize)]
pub struct GoogleSearch {}

/// Generation parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// generateContent response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Token usage information
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,

    /// Search grounding attached to this candidate
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// A grounding chunk; only web chunks are used
#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_token_count: Option<u64>,
    /// Number of generated tokens
    #[serde(default)]
    pub candidates_token_count: Option<u64>,
}

impl GeminiRequest {
    /// Create a request with a single user turn
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: Some(prompt.into()), thought: None }],
            }],
            tools: Vec::new(),
            generation_config: None,
        }
    }

    /// Enable Google Search grounding
    pub fn with_google_search(mut self) -> Self {
        self.tools.push(GeminiTool { google_search: Some(GoogleSearch {}) });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config = Some(GenerationConfig { temperature: Some(temperature) });
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    ///
    /// No request timeout is set unless `timeout_secs` is given.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self {
            client: builder.build().unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Model identifier used by this client
    pub fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// URL of the generateContent method for the configured model
    pub fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url(), self.model)
    }

    fn model_url(&self) -> String {
        format!("{}/v1beta/models/{}", self.base_url(), self.model)
    }

    async fn error_from_response(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let error_text = response.text().await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("Gemini API error ({}): {}", status, error_text);
        ProviderError::from_status(status.as_u16(), error_text)
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self.client.post(self.generate_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to Gemini API: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Gemini API response: {}", e)))?;

        let gemini_response: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Gemini token usage: prompt={}, completion={}",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0)
            );
        }

        Ok(gemini_response)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    fn grounded_request(&self, prompt: &str, temperature: f32) -> GeminiRequest {
        GeminiRequest::new(prompt)
            .with_google_search()
            .temperature(temperature)
    }

    fn extract_text(response: &GeminiResponse) -> Option<String> {
        let content = response.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter()
            .filter(|p| !p.thought.unwrap_or(false))
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }

    fn extract_citations(response: &GeminiResponse) -> Vec<RawCitation> {
        response.candidates.first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| {
                m.grounding_chunks.iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| RawCitation::new(web.title.clone(), web.uri.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
