/*!
 * Provider implementations for grounded generative models.
 *
 * This module contains the client for the hosted model used for analysis:
 * - Gemini: Google Generative Language API with Google Search grounding
 * - Mock: scripted provider for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::analysis::RawCitation;
use crate::errors::ProviderError;

/// Common trait for all grounded LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the analysis requester.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Build a request for a single prompt with web-search grounding enabled
    fn grounded_request(&self, prompt: &str, temperature: f32) -> Self::Request;

    /// Extract the generated text from the provider response, if any
    fn extract_text(response: &Self::Response) -> Option<String>;

    /// Extract the web citations of the first candidate.
    ///
    /// Chunks that carry no web reference are not returned.
    fn extract_citations(response: &Self::Response) -> Vec<RawCitation>;
}

pub mod gemini;
pub mod mock;
