/*!
 * Common test utilities for the cinescore test suite
 */

use std::path::Path;
use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;

use cinescore::analysis::RawCitation;
use cinescore::app_config::AnalysisConfig;
use cinescore::providers::mock::MockProvider;
use cinescore::AnalysisRequester;

/// The review used throughout the suite
pub const SAMPLE_REVIEW: &str = "This film received widespread critical acclaim for its visuals and pacing.
Strengths:
- Stunning cinematography
- Strong lead performance
Criticisms:
- Runtime feels long";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Citation with both fields set
pub fn citation(title: &str, uri: &str) -> RawCitation {
    RawCitation::new(Some(title.to_string()), Some(uri.to_string()))
}

/// Requester over the given mock with default analysis settings
pub fn mock_requester(provider: MockProvider) -> AnalysisRequester<MockProvider> {
    AnalysisRequester::new(provider, &AnalysisConfig::default())
}
