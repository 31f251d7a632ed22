//! Title strings such as `"DSC 10. Principles of Data Science (4)"`.
//!
//! Parsing is staged: the code span is located first and cut out, then the
//! remainder is scanned once for the name separator and the trailing unit
//! group, and the spans are assigned to fields at the end.

use crate::domain::model::{ParsedTitle, NOT_AVAILABLE};
use crate::utils::error::TitleParseError;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn code_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(?[A-Z]{2,}\)? [0-9/]+[A-Z\-]*").unwrap())
}

fn separator_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\.?\s*").unwrap())
}

fn units_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([./\w,\s–-]+\)").unwrap())
}

/// Name and unit spans over the title with its code removed.
#[derive(Debug, Default, PartialEq, Eq)]
struct TitleSpans {
    name: Option<Range<usize>>,
    units: Option<Range<usize>>,
}

pub fn parse_title(text: &str) -> Result<ParsedTitle, TitleParseError> {
    let code = code_pattern().find(text).ok_or_else(|| TitleParseError {
        title: text.to_string(),
    })?;

    let rest = format!("{}{}", &text[..code.start()], &text[code.end()..]);
    let spans = locate_spans(&rest);

    let name = spans
        .name
        .map(|r| clean_name(&rest[r]))
        .unwrap_or_default();
    let units = spans
        .units
        .map(|r| rest[r].to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Ok(ParsedTitle {
        code: code.as_str().to_string(),
        name,
        units,
    })
}

fn locate_spans(rest: &str) -> TitleSpans {
    // Only a leading period/space run separates the code from the name.
    let start = separator_pattern().find(rest).map_or(0, |m| m.end());
    if start >= rest.len() {
        return TitleSpans::default();
    }

    let body = &rest[start..];
    if !body.contains('(') {
        return TitleSpans {
            name: Some(start..rest.len()),
            units: None,
        };
    }

    match body.rfind(" (").filter(|&split| split > 0) {
        Some(split) => {
            let tail_start = start + split;
            TitleSpans {
                name: Some(start..tail_start),
                units: units_pattern()
                    .find(&rest[tail_start..])
                    .map(|m| tail_start + m.start()..tail_start + m.end()),
            }
        }
        None => match units_pattern().find(body).filter(|m| m.start() == 0) {
            Some(m) => TitleSpans {
                name: None,
                units: Some(start + m.start()..start + m.end()),
            },
            None => TitleSpans {
                name: Some(start..rest.len()),
                units: None,
            },
        },
    }
}

fn clean_name(raw: &str) -> String {
    raw.trim().trim_start_matches('.').trim().to_string()
}
