pub mod batch;
pub mod description;
pub mod etl;
pub mod pipeline;
pub mod prerequisite;
pub mod title;

pub use crate::domain::model::{OutputRecord, RawRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
