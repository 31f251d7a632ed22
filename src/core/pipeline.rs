pub use crate::app::pipelines::catalog_pipeline::{
    input_delimiter, read_raw_records, CatalogPipeline, COURSE_COLUMNS, CSV_FILENAME,
    JSON_FILENAME, REJECTED_FILENAME, SUMMARY_FILENAME, TSV_FILENAME,
};
