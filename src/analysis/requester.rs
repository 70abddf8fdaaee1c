/*!
 * Analysis requester: prompt construction and the grounded model call.
 */

use log::{debug, error};

use crate::app_config::AnalysisConfig;
use crate::errors::AnalysisError;
use crate::providers::Provider;

use super::model::{AnalysisRequest, MovieAnalysis, RawModelResponse};
use super::parser::parse_response;
use super::prompts::build_prompt;

/// Text used when the model returns nothing
pub const NO_ANALYSIS_TEXT: &str = "No analysis available.";

/// Issues grounded analysis requests against a provider.
///
/// Holds no per-request state, so one requester can serve concurrent
/// searches for different titles.
#[derive(Debug)]
pub struct AnalysisRequester<P: Provider> {
    provider: P,
    prompt_template: String,
    temperature: f32,
}

impl<P: Provider> AnalysisRequester<P> {
    /// Create a requester using the given analysis settings
    pub fn new(provider: P, settings: &AnalysisConfig) -> Self {
        Self {
            provider,
            prompt_template: settings.prompt_template.clone(),
            temperature: settings.temperature,
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Call the model for one title and return its raw text and web citations
    pub async fn fetch(&self, request: &AnalysisRequest) -> Result<RawModelResponse, AnalysisError> {
        let prompt = build_prompt(&self.prompt_template, request.title());
        debug!("Requesting analysis for '{}' (temperature {})", request.title(), self.temperature);

        let provider_request = self.provider.grounded_request(&prompt, self.temperature);
        let response = self.provider.complete(provider_request).await.map_err(|e| {
            error!("Error fetching movie analysis for '{}': {}", request.title(), e);
            AnalysisError::FetchFailed(e)
        })?;

        let text = P::extract_text(&response)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_ANALYSIS_TEXT.to_string());
        let citations = P::extract_citations(&response);
        debug!("Received {} chars and {} web citations", text.len(), citations.len());

        Ok(RawModelResponse { text, citations })
    }

    /// Fetch and parse the critical consensus for a title
    pub async fn analyze(&self, title: &str) -> Result<MovieAnalysis, AnalysisError> {
        let request = AnalysisRequest::new(title)?;
        let raw = self.fetch(&request).await?;
        Ok(parse_response(&raw.text, &raw.citations))
    }
}
