use crate::core::batch::{process_batch, Strictness};
use crate::core::{ConfigProvider, Pipeline, RawRecord, Storage, TransformResult};
use crate::domain::model::{CourseRow, OutputRecord, RejectedRecord, RunSummary};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::path::Path;

pub const CSV_FILENAME: &str = "course_data.csv";
pub const TSV_FILENAME: &str = "course_data.tsv";
pub const JSON_FILENAME: &str = "course_data.json";
pub const REJECTED_FILENAME: &str = "rejected.csv";
pub const SUMMARY_FILENAME: &str = "run_summary.json";

pub const COURSE_COLUMNS: [&str; 7] = [
    "code",
    "name",
    "department",
    "units",
    "description",
    "prerequisite",
    "hasStructuredPrereq",
];
const REJECTED_COLUMNS: [&str; 3] = ["line", "title", "reason"];

pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, filename: &str) -> String {
        Path::new(self.config.output_path())
            .join(filename)
            .to_string_lossy()
            .into_owned()
    }

    async fn write_output(&self, filename: &str, data: &[u8]) -> Result<String> {
        let path = self.output_file(filename);
        tracing::debug!("Writing {} ({} bytes)", path, data.len());
        self.storage.write_file(&path, data).await?;
        Ok(path)
    }
}

/// `.tsv` inputs are tab separated, everything else is read as CSV.
pub fn input_delimiter(path: &str) -> u8 {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

/// Reads the scraper's two-column (title, description) dataset.
///
/// An empty or missing description cell becomes an absent description.
/// Cells that are not valid UTF-8 are repaired with replacement characters
/// so one bad row does not take the rest of the batch down with it.
pub fn read_raw_records(data: &[u8], has_header: bool, delimiter: u8) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let mut records = Vec::new();
    for (index, row) in reader.byte_records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(index + 1);

        let title = decode_cell(&row, 0, line).unwrap_or_default();
        let description = decode_cell(&row, 1, line).filter(|text| !text.is_empty());

        records.push(RawRecord::new(line, title, description));
    }

    Ok(records)
}

fn decode_cell(row: &csv::ByteRecord, field: usize, line: usize) -> Option<String> {
    let text = String::from_utf8_lossy(row.get(field)?);
    if let Cow::Owned(_) = text {
        tracing::warn!(
            "⚠️ Invalid UTF-8 in line {} field {}, replaced undecodable bytes",
            line,
            field + 1
        );
    }
    Some(text.into_owned())
}

fn to_delimited<T: Serialize>(columns: &[&str], rows: &[T], delimiter: u8) -> Result<Vec<u8>> {
    // 手動寫表頭，空資料集也要有欄位列
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawRecord>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading raw catalog data from: {}", input_path);

        let data = self.storage.read_file(input_path).await?;
        let records = read_raw_records(&data, self.config.has_header(), input_delimiter(input_path))?;

        if records.is_empty() {
            tracing::warn!("⚠️ No records found in {}", input_path);
        }

        Ok(records)
    }

    async fn transform(&self, data: Vec<RawRecord>) -> Result<TransformResult> {
        let strictness = Strictness::from_flag(self.config.strict());
        tracing::debug!("Transforming {} records ({:?})", data.len(), strictness);
        process_batch(data, strictness)
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let rows: Vec<CourseRow> = result.records.iter().map(OutputRecord::to_row).collect();
        let mut output_files = Vec::new();

        for format in self.config.output_formats() {
            let path = match format.as_str() {
                "csv" => {
                    let data = to_delimited(&COURSE_COLUMNS, &rows, b',')?;
                    self.write_output(CSV_FILENAME, &data).await?
                }
                "tsv" => {
                    let data = to_delimited(&COURSE_COLUMNS, &rows, b'\t')?;
                    self.write_output(TSV_FILENAME, &data).await?
                }
                "json" => {
                    let data = serde_json::to_vec_pretty(&result.records)?;
                    self.write_output(JSON_FILENAME, &data).await?
                }
                other => {
                    return Err(EtlError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            };
            output_files.push(path);
        }

        if !result.rejected.is_empty() {
            tracing::warn!(
                "⚠️ {} records had no course code and were skipped",
                result.rejected.len()
            );
            let data = to_delimited::<RejectedRecord>(&REJECTED_COLUMNS, &result.rejected, b',')?;
            output_files.push(self.write_output(REJECTED_FILENAME, &data).await?);
        }

        let summary = RunSummary {
            pipeline: self.config.pipeline_name().to_string(),
            generated_at: chrono::Utc::now(),
            records_written: result.records.len(),
            records_rejected: result.rejected.len(),
            structured_prerequisites: result
                .records
                .iter()
                .filter(|r| r.has_structured_prereq())
                .count(),
            output_files,
        };
        self.write_output(SUMMARY_FILENAME, &serde_json::to_vec_pretty(&summary)?)
            .await?;

        Ok(self.config.output_path().to_string())
    }
}
