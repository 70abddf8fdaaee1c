/*!
 * Single-owner container for the search state.
 *
 * Each submission gets a fresh, increasing sequence number. Responses are
 * fed back with the number they were issued under, and only the response
 * for the latest submission is applied; late responses from older searches
 * are dropped instead of overwriting newer results.
 */

use log::debug;

use crate::analysis::MovieAnalysis;
use crate::errors::AnalysisError;

use super::models::{transition, SearchEvent, SearchState};

/// Owns the current search state and the request sequence counter
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    last_seq: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Sequence number of the most recent submission (0 before any)
    pub fn latest_seq(&self) -> u64 {
        self.last_seq
    }

    /// Start a search and return the sequence number to tag its request with.
    ///
    /// Returns `None` and leaves the state alone for a blank title.
    pub fn submit(&mut self, title: &str) -> Option<u64> {
        if title.trim().is_empty() {
            return None;
        }
        self.last_seq += 1;
        let seq = self.last_seq;
        self.apply(SearchEvent::SearchSubmitted { title: title.to_string(), seq });
        Some(seq)
    }

    /// Feed back the outcome of request `seq`. Returns false if it was stale.
    pub fn receive(&mut self, seq: u64, result: Result<MovieAnalysis, AnalysisError>) -> bool {
        let accepted = self.state.pending_seq() == Some(seq);
        if !accepted {
            debug!("Discarding stale response #{} (latest is #{})", seq, self.last_seq);
        }
        self.apply(SearchEvent::ResponseArrived { seq, result });
        accepted
    }

    /// Return to the idle state, keeping the sequence counter
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
    }

    fn apply(&mut self, event: SearchEvent) {
        let current = std::mem::take(&mut self.state);
        self.state = transition(current, event);
    }
}
