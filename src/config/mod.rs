pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::report::{DEFAULT_CURRENCY, DEFAULT_TITLE};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT: &str = "sample_data.csv";
pub const DEFAULT_REPORT_FILE: &str = "sales_report.txt";
pub const DEFAULT_CHART_FILE: &str = "sales_by_product.svg";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sales-etl")]
#[command(about = "Clean a sales CSV export, summarize it and chart sales by product")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_INPUT, help = "Sales CSV with Date, Product and Sales columns")]
    pub input: String,

    #[arg(long, default_value = ".", help = "Directory the report and chart are written to")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_file: String,

    #[arg(long, default_value = DEFAULT_CHART_FILE)]
    pub chart_file: String,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    #[arg(short, long, help = "Read settings from a TOML file instead of the flags above")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_file(&self) -> &str {
        &self.report_file
    }

    fn chart_file(&self) -> &str {
        &self.chart_file
    }

    fn report_title(&self) -> &str {
        &self.title
    }

    fn currency_symbol(&self) -> &str {
        &self.currency
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider(self)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_fixed_names() {
        let config = CliConfig::parse_from(["sales-etl"]);
        assert_eq!(config.input_path(), "sample_data.csv");
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.report_file(), "sales_report.txt");
        assert_eq!(config.chart_file(), "sales_by_product.svg");
        assert_eq!(config.report_title(), "SALES REPORT");
        assert_eq!(config.currency_symbol(), "£");
        assert!(config.config.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = CliConfig::parse_from([
            "sales-etl",
            "--input",
            "data/q1.csv",
            "--chart-file",
            "q1.svg",
            "--currency",
            "$",
            "--verbose",
        ]);
        assert_eq!(config.input_path(), "data/q1.csv");
        assert_eq!(config.chart_file(), "q1.svg");
        assert_eq!(config.currency_symbol(), "$");
        assert!(config.verbose);
    }

    #[test]
    fn test_wrong_report_extension_fails_validation() {
        let config = CliConfig::parse_from(["sales-etl", "--report-file", "report.pdf"]);
        assert!(config.validate().is_err());
    }
}
