/*!
 * Data types flowing through an analysis request.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AnalysisError;

/// Maximum number of pros, cons and sources kept on a `MovieAnalysis`
pub const MAX_LIST_ITEMS: usize = 5;

/// A validated request for a single movie title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    title: String,
}

impl AnalysisRequest {
    /// Create a request, rejecting blank titles
    pub fn new(title: impl Into<String>) -> Result<Self, AnalysisError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::EmptyTitle);
        }
        Ok(Self { title: trimmed.to_string() })
    }

    /// The movie title
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A web citation as returned by the model, before defaults are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCitation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl RawCitation {
    pub fn new(title: Option<String>, uri: Option<String>) -> Self {
        Self { title, uri }
    }
}

/// Unstructured model output handed to the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub text: String,
    pub citations: Vec<RawCitation>,
}

/// A cited web source on a finished analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Coarse critical sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Mixed,
    Negative,
}

impl Sentiment {
    /// Classify from the number of extracted strengths and criticisms.
    ///
    /// Positive needs more than two extra pros, Negative more than one extra con.
    pub fn from_counts(pros: usize, cons: usize) -> Self {
        let mut sentiment = Self::Mixed;
        if pros > cons + 2 {
            sentiment = Self::Positive;
        }
        if cons > pros + 1 {
            sentiment = Self::Negative;
        }
        sentiment
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Mixed => "Mixed",
            Self::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured critical consensus for one movie.
///
/// Built once by the parser and never mutated afterwards. The list lengths
/// are capped at [`MAX_LIST_ITEMS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieAnalysis {
    summary: String,
    pros: Vec<String>,
    cons: Vec<String>,
    sentiment: Sentiment,
    sources: Vec<GroundingSource>,
}

impl MovieAnalysis {
    /// Assemble an analysis, truncating each list to its cap
    pub fn new(
        summary: String,
        mut pros: Vec<String>,
        mut cons: Vec<String>,
        sentiment: Sentiment,
        mut sources: Vec<GroundingSource>,
    ) -> Self {
        pros.truncate(MAX_LIST_ITEMS);
        cons.truncate(MAX_LIST_ITEMS);
        sources.truncate(MAX_LIST_ITEMS);
        Self { summary, pros, cons, sentiment, sources }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn pros(&self) -> &[String] {
        &self.pros
    }

    pub fn cons(&self) -> &[String] {
        &self.cons
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    pub fn sources(&self) -> &[GroundingSource] {
        &self.sources
    }
}
