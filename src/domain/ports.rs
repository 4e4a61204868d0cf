use crate::domain::model::{AggregationResult, Table};
use crate::utils::error::Result;

/// File access used by the pipeline. `read_file` takes the source path as
/// given; `write_file` places `name` under the storage's output location.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;
    /// Path reported to the user for a written file.
    fn output_location(&self, name: &str) -> String;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn report_file(&self) -> &str;
    fn chart_file(&self) -> &str;
    fn report_title(&self) -> &str;
    fn currency_symbol(&self) -> &str;

    fn chart_title(&self) -> &str {
        "Total Sales by Product"
    }

    fn chart_size(&self) -> (u32, u32) {
        (1000, 600)
    }

    fn bar_color(&self) -> &str {
        "skyblue"
    }
}

/// The four stages of a report run, in the order the engine drives them.
pub trait Pipeline {
    fn load(&self) -> Result<Table>;
    fn analyze(&self, table: &Table) -> Result<AggregationResult>;
    /// Renders and saves the text report, returning where it was written.
    fn report(&self, table: &Table, result: &AggregationResult) -> Result<String>;
    /// Renders and saves the chart image, returning where it was written.
    fn chart(&self, table: &Table) -> Result<String>;
}
