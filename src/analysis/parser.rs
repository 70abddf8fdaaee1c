/*!
 * Heuristic parser turning free-form model output into a `MovieAnalysis`.
 *
 * The text is scanned line by line with one of three current sections
 * (summary, pros, cons). Header lines switch the section and are consumed;
 * bulleted lines under pros/cons become list items; summary lines are joined.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{GroundingSource, MovieAnalysis, RawCitation, Sentiment, MAX_LIST_ITEMS};

/// Keywords that open the strengths section
const PROS_MARKERS: [&str; 3] = ["pros", "strengths", "what they liked"];

/// Keywords that open the criticisms section
const CONS_MARKERS: [&str; 3] = ["cons", "weaknesses", "criticisms"];

/// Characters of the raw text kept when no summary could be isolated
pub const SUMMARY_FALLBACK_CHARS: usize = 300;

const DEFAULT_SOURCE_TITLE: &str = "Source";
const DEFAULT_SOURCE_URI: &str = "#";

static NUMBERED_BULLET_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.").unwrap()
});

static BULLET_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-*\d.]+\s*").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Pros,
    Cons,
}

/// Parse raw model text and its citations into a structured analysis.
///
/// Never fails: any input, including empty text, yields a well-formed record.
pub fn parse_response(text: &str, citations: &[RawCitation]) -> MovieAnalysis {
    let mut section = Section::Summary;
    let mut summary = String::new();
    let mut pros: Vec<String> = Vec::new();
    let mut cons: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if let Some(next) = section_switch(line) {
            section = next;
            continue;
        }

        match section {
            Section::Summary => {
                summary.push_str(line);
                summary.push(' ');
            }
            Section::Pros => {
                if let Some(item) = bullet_item(line) {
                    pros.push(item);
                }
            }
            Section::Cons => {
                if let Some(item) = bullet_item(line) {
                    cons.push(item);
                }
            }
        }
    }

    let sentiment = Sentiment::from_counts(pros.len(), cons.len());

    let summary = match summary.trim() {
        "" => fallback_summary(text),
        trimmed => trimmed.to_string(),
    };

    MovieAnalysis::new(summary, pros, cons, sentiment, map_sources(citations))
}

/// Returns the section a header line switches to, if any
fn section_switch(line: &str) -> Option<Section> {
    let lower = line.to_lowercase();
    if PROS_MARKERS.iter().any(|m| lower.contains(m)) {
        Some(Section::Pros)
    } else if CONS_MARKERS.iter().any(|m| lower.contains(m)) {
        Some(Section::Cons)
    } else {
        None
    }
}

/// Strips the bullet marker from a list line, or `None` if it is not a bullet
fn bullet_item(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let is_bullet = trimmed.starts_with('-')
        || trimmed.starts_with('*')
        || NUMBERED_BULLET_REGEX.is_match(trimmed);
    if !is_bullet {
        return None;
    }
    Some(BULLET_PREFIX_REGEX.replace(trimmed, "").trim().to_string())
}

fn fallback_summary(text: &str) -> String {
    let mut summary: String = text.chars().take(SUMMARY_FALLBACK_CHARS).collect();
    summary.push_str("...");
    summary
}

fn map_sources(citations: &[RawCitation]) -> Vec<GroundingSource> {
    citations
        .iter()
        .take(MAX_LIST_ITEMS)
        .map(|c| GroundingSource {
            title: non_empty_or(c.title.as_deref(), DEFAULT_SOURCE_TITLE),
            uri: non_empty_or(c.uri.as_deref(), DEFAULT_SOURCE_URI),
        })
        .collect()
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
