/*!
 * # CineScore - AI critical consensus for movies
 *
 * A Rust library for summarizing what critics think of a movie using a
 * web-grounded generative model.
 *
 * ## Features
 *
 * - Grounded requests to the Gemini API (Google Search citations)
 * - Heuristic parsing of the free-form answer into summary, pros, cons,
 *   sentiment and sources
 * - Search session state machine that drops stale responses
 * - Configurable model, endpoint, prompt and temperature
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `analysis`: Request, parsing and result types:
 *   - `analysis::requester`: Grounded model call for a title
 *   - `analysis::parser`: Text-to-structure parser
 * - `providers`: Client implementations for model providers:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::mock`: Scripted provider for tests
 * - `session`: Search state machine and session container
 * - `render`: Terminal and JSON output
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod analysis;
pub mod app_controller;
pub mod providers;
pub mod render;
pub mod session;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use analysis::{parse_response, AnalysisRequester, MovieAnalysis, Sentiment};
pub use session::{SearchSession, SearchState};
pub use errors::{AnalysisError, AppError, ProviderError};
