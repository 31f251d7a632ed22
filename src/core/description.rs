use crate::domain::model::{ParsedDescription, NOT_AVAILABLE};
use regex::Regex;
use std::sync::OnceLock;

pub const PREREQUISITE_MARKER: &str = "Prerequisites:";

/// The marker, then `none` or everything up to the first `.` or `;`.
/// A period directly after the clause goes with it; a semicolon stays.
fn clause_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Prerequisites:\s*(?:none|[^.;]+)?\.?").unwrap())
}

/// Splits a catalog description into the prose and its prerequisite clause.
pub fn split_description(text: Option<&str>) -> ParsedDescription {
    let Some(text) = text else {
        return ParsedDescription {
            description: String::new(),
            prerequisite_clause: NOT_AVAILABLE.to_string(),
        };
    };

    // Scraped pages carry non-breaking spaces that would defeat the patterns below.
    let text = text.replace('\u{a0}', " ");

    match clause_pattern().find(&text) {
        Some(clause) => ParsedDescription {
            description: clause_pattern().replace_all(&text, "").trim().to_string(),
            prerequisite_clause: clause.as_str().trim_end().to_string(),
        },
        None => ParsedDescription {
            description: text.trim().to_string(),
            prerequisite_clause: NOT_AVAILABLE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_description() {
        let parsed = split_description(None);
        assert_eq!(parsed.description, "");
        assert_eq!(parsed.prerequisite_clause, "N/A");
    }

    #[test]
    fn test_clause_removed_from_description() {
        let parsed = split_description(Some(
            "Economic issues of marine resources, including coral reefs. Prerequisites: ECON 2 or 100A.",
        ));

        assert_eq!(
            parsed.description,
            "Economic issues of marine resources, including coral reefs."
        );
        assert_eq!(parsed.prerequisite_clause, "Prerequisites: ECON 2 or 100A.");
    }

    #[test]
    fn test_no_marker_keeps_text() {
        let parsed = split_description(Some("An introduction to data science."));
        assert_eq!(parsed.description, "An introduction to data science.");
        assert_eq!(parsed.prerequisite_clause, "N/A");
    }

    #[test]
    fn test_clause_stops_at_semicolon() {
        let parsed = split_description(Some(
            "Probability for data science. Prerequisites: MATH 18; restricted to DS25 majors.",
        ));

        assert_eq!(parsed.prerequisite_clause, "Prerequisites: MATH 18");
        assert_eq!(
            parsed.description,
            "Probability for data science. ; restricted to DS25 majors."
        );
    }

    #[test]
    fn test_none_is_captured_on_its_own() {
        let parsed = split_description(Some("Seminar for freshmen. Prerequisites: none."));
        assert_eq!(parsed.prerequisite_clause, "Prerequisites: none.");
        assert_eq!(parsed.description, "Seminar for freshmen.");
    }

    #[test]
    fn test_non_breaking_spaces_are_normalized() {
        let parsed = split_description(Some(
            "Linear models.\u{a0}Prerequisites:\u{a0}DSC\u{a0}40A.",
        ));

        assert_eq!(parsed.prerequisite_clause, "Prerequisites: DSC 40A.");
        assert_eq!(parsed.description, "Linear models.");
    }

    #[test]
    fn test_clause_runs_to_end_without_terminator() {
        let parsed = split_description(Some("Capstone. Prerequisites: DSC 180A"));
        assert_eq!(parsed.prerequisite_clause, "Prerequisites: DSC 180A");
        assert_eq!(parsed.description, "Capstone.");
    }

    #[test]
    fn test_marker_never_survives_in_description() {
        let parsed = split_description(Some(
            "Part one. Prerequisites: CSE 12. Part two. Prerequisites: CSE 15L.",
        ));

        assert_eq!(parsed.prerequisite_clause, "Prerequisites: CSE 12.");
        assert!(!parsed.description.contains(PREREQUISITE_MARKER));
    }
}
