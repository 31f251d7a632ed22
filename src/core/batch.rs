use crate::core::description::split_description;
use crate::core::prerequisite::{parse_prerequisites, strip_marker};
use crate::core::title::parse_title;
use crate::domain::model::{OutputRecord, RawRecord, RejectedRecord, TransformResult};
use crate::utils::error::{EtlError, Result, TitleParseError};

/// What to do with a record whose title has no course code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Abort the whole batch.
    Strict,
    /// Skip the record and report it in [`TransformResult::rejected`].
    #[default]
    Lenient,
}

impl Strictness {
    pub fn from_flag(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }
}

pub fn derive_department(code: &str) -> String {
    code.split_whitespace().next().unwrap_or_default().to_string()
}

pub fn process_record(record: &RawRecord) -> std::result::Result<OutputRecord, TitleParseError> {
    let title = parse_title(&record.title)?;
    let description = split_description(record.description.as_deref());
    let prerequisite = parse_prerequisites(strip_marker(&description.prerequisite_clause));

    Ok(OutputRecord {
        department: derive_department(&title.code),
        code: title.code,
        name: title.name,
        units: title.units,
        description: description.description,
        prerequisite,
    })
}

/// Runs every record through the parsers, in input order.
pub fn process_batch<I>(records: I, strictness: Strictness) -> Result<TransformResult>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut result = TransformResult::default();

    for record in records {
        match process_record(&record) {
            Ok(output) => {
                tracing::debug!(
                    line = record.line,
                    code = %output.code,
                    structured = output.has_structured_prereq(),
                    "Parsed course record"
                );
                result.records.push(output);
            }
            Err(source) if strictness == Strictness::Strict => {
                return Err(EtlError::TitleParse {
                    line: record.line,
                    source,
                });
            }
            Err(source) => {
                tracing::warn!("⚠️ Skipping line {}: {}", record.line, source);
                result.rejected.push(RejectedRecord {
                    line: record.line,
                    title: record.title,
                    reason: source.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        "Batch finished: {} parsed, {} rejected",
        result.records.len(),
        result.rejected.len()
    );

    Ok(result)
}
