pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::batch::{process_batch, process_record, Strictness};
pub use crate::core::description::split_description;
pub use crate::core::prerequisite::{parse_prerequisites, strip_marker};
pub use crate::core::title::parse_title;
pub use crate::core::{etl::EtlEngine, pipeline::CatalogPipeline};
pub use domain::model::{
    OutputRecord, ParsedDescription, ParsedTitle, Prerequisite, PrerequisiteExpression, RawRecord,
};
pub use utils::error::{EtlError, Result, TitleParseError};
