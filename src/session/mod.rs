/*!
 * Search session management.
 *
 * This module provides:
 * - The search state machine (`Idle`, `Loading`, `Loaded`, `Failed`)
 * - A single-owner session that sequences requests and drops stale responses
 */

pub mod manager;
pub mod models;

// Re-export main types
pub use manager::SearchSession;
pub use models::{transition, SearchEvent, SearchState};
