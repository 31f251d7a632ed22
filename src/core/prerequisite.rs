//! Prerequisite clauses into AND-groups of OR-alternative course codes.
//!
//! The grammar is shallow on purpose: segments are split on commas and the
//! word `and`, alternatives on the word `or`, and each alternative keeps the
//! first course code it contains. `and`/`or` inside free prose are not told
//! apart from course logic; clauses that yield no course code at all come
//! back verbatim as [`Prerequisite::Fallback`].

use crate::core::description::PREREQUISITE_MARKER;
use crate::domain::model::{Prerequisite, PrerequisiteExpression};
use regex::Regex;
use std::sync::OnceLock;

pub(crate) fn course_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]{2,} [0-9]{1,3}[A-Z\-]*").unwrap())
}

fn and_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\band\b").unwrap())
}

fn or_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bor\b").unwrap())
}

fn comma_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s*").unwrap())
}

fn leading_or_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^or\b").unwrap())
}

/// Drops the `Prerequisites:` label and surrounding whitespace.
pub fn strip_marker(clause: &str) -> &str {
    let trimmed = clause.trim();
    trimmed
        .strip_prefix(PREREQUISITE_MARKER)
        .map(str::trim)
        .unwrap_or(trimmed)
}

pub fn parse_prerequisites(clause: &str) -> Prerequisite {
    let groups = split_and_groups(clause)
        .into_iter()
        .map(|segment| {
            or_pattern()
                .split(segment)
                .filter_map(extract_course)
                .collect::<Vec<_>>()
        })
        .collect();

    match PrerequisiteExpression::new(groups) {
        Some(expr) => Prerequisite::Structured(expr),
        None => Prerequisite::Fallback(clause.to_string()),
    }
}

/// Splits on the word `and` and on commas not followed by `or`.
fn split_and_groups(clause: &str) -> Vec<&str> {
    let mut segments = Vec::new();

    for part in and_pattern().split(clause.trim()) {
        let mut start = 0;
        for comma in comma_pattern().find_iter(part) {
            // ", or" continues the alternatives of the current group
            if leading_or_pattern().is_match(&part[comma.end()..]) {
                continue;
            }
            segments.push(&part[start..comma.start()]);
            start = comma.end();
        }
        segments.push(&part[start..]);
    }

    segments
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

fn extract_course(alternative: &str) -> Option<String> {
    if alternative.contains("consent") {
        return None;
    }

    course_pattern()
        .find(alternative)
        .map(|m| m.as_str().trim_matches(|c: char| c == '(' || c == ')' || c == ' '))
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}
