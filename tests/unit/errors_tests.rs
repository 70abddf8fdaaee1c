/*!
 * Tests for error types and conversions
 */

use cinescore::errors::{AnalysisError, AppError, ProviderError};

#[test]
fn test_providerError_fromStatus_shouldClassifyAuthAndQuota() {
    assert!(matches!(ProviderError::from_status(401, "bad key"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "forbidden"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "quota"), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(503, "unavailable"),
        ProviderError::ApiError { status_code: 503, .. }
    ));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 500,
        message: "Internal".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("Internal"));
}

#[test]
fn test_analysisError_fetchFailed_shouldHideProviderDetail() {
    let error: AnalysisError = ProviderError::AuthenticationError("API key not valid".to_string()).into();

    assert_eq!(error.to_string(), "Analysis fetch failed");
    assert_eq!(error.user_message(), "Failed to fetch analysis. Please check your API key.");
}

#[test]
fn test_analysisError_emptyTitle_shouldHaveDistinctMessage() {
    let error = AnalysisError::EmptyTitle;
    assert!(error.to_string().contains("empty"));
    assert_eq!(error.user_message(), "Please enter a movie title.");
}

#[test]
fn test_appError_fromAnalysisError_shouldWrapCorrectly() {
    let app_error: AppError = AnalysisError::EmptyTitle.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Analysis error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app_error, AppError::Unknown(ref m) if m == "boom"));
}
