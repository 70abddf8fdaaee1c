/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with a structured review
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Succeeds without any text
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::analysis::RawCitation;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The full prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether web-search grounding was requested
    pub grounded: bool,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The generated text, if any
    pub text: Option<String>,
    /// Grounding chunks; `None` entries stand for chunks without a web reference
    pub chunks: Vec<Option<RawCitation>>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned review
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with the given HTTP status
    Failing { status_code: u16 },
    /// Returns a response without text or citations
    Empty,
    /// Simulates slow response
    Slow { delay_ms: u64 },
}

/// Mock provider for testing analysis behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Last request received
    last_request: Arc<Mutex<Option<MockRequest>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> MockResponse>,
    /// Per-request delay in milliseconds (optional)
    custom_delay: Option<fn(&MockRequest) -> u64>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            custom_response: None,
            custom_delay: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors with HTTP 500
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing { status_code: 500 })
    }

    /// Create a failing mock provider with a specific HTTP status
    pub fn failing_with_status(status_code: u16) -> Self {
        Self::new(MockBehavior::Failing { status_code })
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> MockResponse) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Set a per-request delay
    pub fn with_custom_delay(mut self, delay: fn(&MockRequest) -> u64) -> Self {
        self.custom_delay = Some(delay);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Last request received
    pub fn last_request(&self) -> Option<MockRequest> {
        self.last_request.lock().clone()
    }

    /// Generate a review with the given pros and cons under the usual headers
    pub fn generate_review(summary: &str, pros: &[&str], cons: &[&str]) -> String {
        let mut review = format!("{}\n", summary);
        review.push_str("Strengths:\n");
        for item in pros {
            review.push_str(&format!("- {}\n", item));
        }
        review.push_str("Criticisms:\n");
        for item in cons {
            review.push_str(&format!("- {}\n", item));
        }
        review
    }

    fn default_response(request: &MockRequest) -> MockResponse {
        let title = request.prompt.split('"').nth(1).unwrap_or("the film");
        let summary = format!("Critics responded warmly to {}.", title);
        MockResponse {
            text: Some(Self::generate_review(
                &summary,
                &["Stunning cinematography", "Strong lead performance"],
                &["Runtime feels long"],
            )),
            chunks: vec![
                Some(RawCitation::new(Some("Variety".to_string()), Some("http://variety.com/x".to_string()))),
                None,
            ],
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            last_request: Arc::clone(&self.last_request),
            custom_response: self.custom_response,
            custom_delay: self.custom_delay,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(request.clone());

        if let Some(delay) = self.custom_delay {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay(&request))).await;
        }

        let respond = |request: &MockRequest| match self.custom_response {
            Some(generator) => generator(request),
            None => Self::default_response(request),
        };

        match self.behavior {
            MockBehavior::Working => Ok(respond(&request)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(respond(&request))
                }
            }

            MockBehavior::Failing { status_code } => Err(ProviderError::from_status(
                status_code,
                "Simulated provider failure",
            )),

            MockBehavior::Empty => Ok(MockResponse {
                text: None,
                chunks: Vec::new(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(respond(&request))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing { status_code } => Err(ProviderError::from_status(
                status_code,
                "Simulated provider failure",
            )),
            _ => Ok(()),
        }
    }

    fn grounded_request(&self, prompt: &str, temperature: f32) -> MockRequest {
        MockRequest {
            prompt: prompt.to_string(),
            temperature,
            grounded: true,
        }
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response.text.clone()
    }

    fn extract_citations(response: &Self::Response) -> Vec<RawCitation> {
        response.chunks.iter().flatten().cloned().collect()
    }
}
