/*!
 * Search states, events and the pure transition function.
 */

use serde::Serialize;

use crate::analysis::MovieAnalysis;
use crate::errors::AnalysisError;

/// What the front end is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchState {
    /// No search issued yet
    #[default]
    Idle,
    /// Waiting for the response to request `seq`
    Loading { title: String, seq: u64 },
    /// Latest search finished
    Loaded { title: String, analysis: MovieAnalysis },
    /// Latest search failed
    Failed { title: String, message: String },
}

impl SearchState {
    /// Title of the search this state belongs to
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { title, .. } | Self::Loaded { title, .. } | Self::Failed { title, .. } => {
                Some(title)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Sequence number of the in-flight request, if any
    pub fn pending_seq(&self) -> Option<u64> {
        match self {
            Self::Loading { seq, .. } => Some(*seq),
            _ => None,
        }
    }
}

/// Input to the state machine
#[derive(Debug)]
pub enum SearchEvent {
    /// The user asked for a title; `seq` tags the outbound request
    SearchSubmitted { title: String, seq: u64 },
    /// The request tagged `seq` completed
    ResponseArrived {
        seq: u64,
        result: Result<MovieAnalysis, AnalysisError>,
    },
}

/// Compute the next state.
///
/// A submission always starts loading, except for a blank title which is
/// ignored. A response is only applied while loading and only when its
/// sequence number matches the in-flight request; anything else is stale.
pub fn transition(state: SearchState, event: SearchEvent) -> SearchState {
    match event {
        SearchEvent::SearchSubmitted { title, seq } => {
            let title = title.trim();
            if title.is_empty() {
                return state;
            }
            SearchState::Loading { title: title.to_string(), seq }
        }
        SearchEvent::ResponseArrived { seq, result } => match state {
            SearchState::Loading { title, seq: pending } if pending == seq => match result {
                Ok(analysis) => SearchState::Loaded { title, analysis },
                Err(e) => SearchState::Failed {
                    title,
                    message: e.user_message().to_string(),
                },
            },
            other => other,
        },
    }
}
