use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Sentinel for a field the catalog intentionally leaves out.
pub const NOT_AVAILABLE: &str = "N/A";

/// One (title, description) pair as handed over by the catalog scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based row in the source dataset, for error reporting only.
    pub line: usize,
    pub title: String,
    pub description: Option<String>,
}

impl RawRecord {
    pub fn new(line: usize, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            line,
            title: title.into(),
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTitle {
    pub code: String,
    pub name: String,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDescription {
    pub description: String,
    /// Either [`NOT_AVAILABLE`] or text starting with `Prerequisites:`.
    pub prerequisite_clause: String,
}

/// AND-groups of OR-alternatives: every group must be satisfied by one of its courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrerequisiteExpression {
    groups: Vec<Vec<String>>,
}

impl PrerequisiteExpression {
    /// Builds an expression, dropping empty groups. Returns `None` if nothing remains.
    pub fn new(groups: Vec<Vec<String>>) -> Option<Self> {
        let groups: Vec<Vec<String>> = groups.into_iter().filter(|g| !g.is_empty()).collect();
        if groups.is_empty() {
            None
        } else {
            Some(Self { groups })
        }
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flatten().map(String::as_str)
    }
}

impl fmt::Display for PrerequisiteExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}]", group.join(", "))?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Prerequisite {
    Structured(PrerequisiteExpression),
    /// Verbatim clause text when no course code could be extracted.
    Fallback(String),
}

impl Prerequisite {
    pub fn has_structured(&self) -> bool {
        matches!(self, Prerequisite::Structured(_))
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prerequisite::Structured(expr) => fmt::Display::fmt(expr, f),
            Prerequisite::Fallback(text) => f.write_str(text),
        }
    }
}

/// Serialized with a derived `hasStructuredPrereq` field next to `prerequisite`;
/// the field is ignored when reading a record back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputRecord {
    pub code: String,
    pub name: String,
    pub units: String,
    pub department: String,
    pub description: String,
    pub prerequisite: Prerequisite,
}

impl OutputRecord {
    pub fn has_structured_prereq(&self) -> bool {
        self.prerequisite.has_structured()
    }

    pub fn to_row(&self) -> CourseRow {
        CourseRow {
            code: self.code.clone(),
            name: self.name.clone(),
            department: self.department.clone(),
            units: self.units.clone(),
            description: self.description.clone(),
            prerequisite: self.prerequisite.to_string(),
            has_structured_prereq: self.has_structured_prereq(),
        }
    }
}

#[derive(Serialize)]
struct OutputDocument<'a> {
    code: &'a str,
    name: &'a str,
    department: &'a str,
    units: &'a str,
    description: &'a str,
    prerequisite: &'a Prerequisite,
    #[serde(rename = "hasStructuredPrereq")]
    has_structured_prereq: bool,
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutputDocument {
            code: &self.code,
            name: &self.name,
            department: &self.department,
            units: &self.units,
            description: &self.description,
            prerequisite: &self.prerequisite,
            has_structured_prereq: self.has_structured_prereq(),
        }
        .serialize(serializer)
    }
}

/// Flat tabular form of an [`OutputRecord`], in output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    pub code: String,
    pub name: String,
    pub department: String,
    pub units: String,
    pub description: String,
    pub prerequisite: String,
    #[serde(rename = "hasStructuredPrereq")]
    pub has_structured_prereq: bool,
}

/// A record skipped because its title carried no course code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub line: usize,
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub records: Vec<OutputRecord>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub pipeline: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub records_written: usize,
    pub records_rejected: usize,
    pub structured_prerequisites: usize,
    pub output_files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(groups: &[&[&str]]) -> Vec<Vec<String>> {
        groups
            .iter()
            .map(|g| g.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_expression_renders_nested_lists() {
        let expr = PrerequisiteExpression::new(codes(&[
            &["MATH 10A", "MATH 20A"],
            &["MATH 10B", "MATH 20B"],
            &["DSC 40A"],
        ]))
        .unwrap();

        assert_eq!(
            expr.to_string(),
            "[[MATH 10A, MATH 20A], [MATH 10B, MATH 20B], [DSC 40A]]"
        );
    }

    #[test]
    fn test_expression_drops_empty_groups() {
        let expr = PrerequisiteExpression::new(codes(&[&[], &["CSE 12"], &[]])).unwrap();
        assert_eq!(expr.groups().len(), 1);
        assert!(PrerequisiteExpression::new(codes(&[&[]])).is_none());
    }

    #[test]
    fn test_row_carries_flag_and_rendering() {
        let record = OutputRecord {
            code: "DSC 80".to_string(),
            name: "The Practice and Application of Data Science".to_string(),
            units: "(4)".to_string(),
            department: "DSC".to_string(),
            description: "Data science in practice.".to_string(),
            prerequisite: Prerequisite::Fallback("upper-division standing.".to_string()),
        };

        let row = record.to_row();
        assert!(!row.has_structured_prereq);
        assert_eq!(row.prerequisite, "upper-division standing.");
    }

    #[test]
    fn test_record_json_carries_structured_flag() {
        let record = OutputRecord {
            code: "DSC 40A".to_string(),
            name: "Theoretical Foundations of Data Science I".to_string(),
            units: "(4)".to_string(),
            department: "DSC".to_string(),
            description: "Modeling and loss.".to_string(),
            prerequisite: Prerequisite::Structured(
                PrerequisiteExpression::new(codes(&[&["DSC 10"]])).unwrap(),
            ),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["hasStructuredPrereq"], true);
        assert_eq!(json["prerequisite"]["kind"], "structured");

        let back: OutputRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_prerequisite_json_is_tagged() {
        let prereq = Prerequisite::Structured(
            PrerequisiteExpression::new(codes(&[&["DSC 40A"]])).unwrap(),
        );
        let json = serde_json::to_value(&prereq).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "structured", "value": [["DSC 40A"]]})
        );
    }
}
