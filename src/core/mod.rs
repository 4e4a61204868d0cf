pub mod aggregator;
pub mod chart;
pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{AggregationResult, SalesRecord, Table};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
