/*!
 * Critical consensus analysis.
 *
 * - `model`: request, raw response and `MovieAnalysis` types
 * - `prompts`: prompt template handling
 * - `requester`: grounded model call for a title
 * - `parser`: heuristic text-to-structure parser
 */

pub mod model;
pub mod parser;
pub mod prompts;
pub mod requester;

pub use model::{
    AnalysisRequest, GroundingSource, MovieAnalysis, RawCitation, RawModelResponse, Sentiment,
    MAX_LIST_ITEMS,
};
pub use parser::parse_response;
pub use requester::{AnalysisRequester, NO_ANALYSIS_TEXT};
