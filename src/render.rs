// Terminal rendering of analysis results

use crate::analysis::{MovieAnalysis, Sentiment};
use crate::session::SearchState;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn sentiment_badge(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "[+] Positive",
        Sentiment::Mixed => "[~] Mixed",
        Sentiment::Negative => "[-] Negative",
    }
}

fn push_list(out: &mut String, heading: &str, marker: &str, items: &[String]) {
    out.push_str(heading);
    out.push('\n');
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str(&format!("  {} {}\n", marker, item));
    }
}

/// Render one analysis as plain text
pub fn render_analysis(title: &str, analysis: &MovieAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", title));
    out.push_str(&format!("Critical consensus: {}\n\n", sentiment_badge(analysis.sentiment())));
    out.push_str(analysis.summary());
    out.push_str("\n\n");

    push_list(&mut out, "What critics liked:", "+", analysis.pros());
    push_list(&mut out, "Common criticisms:", "-", analysis.cons());

    if !analysis.sources().is_empty() {
        out.push_str("Sources:\n");
        for (i, source) in analysis.sources().iter().enumerate() {
            out.push_str(&format!("  {}. {} <{}>\n", i + 1, source.title, source.uri));
        }
    }
    out
}

/// Render a settled search state, `None` for idle and loading states
pub fn render_state(state: &SearchState, format: OutputFormat) -> Option<String> {
    if matches!(state, SearchState::Idle | SearchState::Loading { .. }) {
        return None;
    }
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(state).ok(),
        OutputFormat::Text => match state {
            SearchState::Loaded { title, analysis } => Some(render_analysis(title, analysis)),
            SearchState::Failed { title, message } => Some(format!("{}: {}\n", title, message)),
            _ => None,
        },
    }
}
