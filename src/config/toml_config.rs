use crate::config::{DEFAULT_CHART_FILE, DEFAULT_REPORT_FILE};
use crate::core::report::{DEFAULT_CURRENCY, DEFAULT_TITLE};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: Option<OutputConfig>,
    pub report: Option<ReportConfig>,
    pub chart: Option<ChartConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub filename: Option<String>,
    pub title: Option<String>,
    pub currency_symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub filename: Option<String>,
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bar_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(".")
    }

    fn report_file(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.filename.as_deref())
            .unwrap_or(DEFAULT_REPORT_FILE)
    }

    fn chart_file(&self) -> &str {
        self.chart
            .as_ref()
            .and_then(|c| c.filename.as_deref())
            .unwrap_or(DEFAULT_CHART_FILE)
    }

    fn report_title(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
    }

    fn currency_symbol(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.currency_symbol.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    fn chart_title(&self) -> &str {
        self.chart
            .as_ref()
            .and_then(|c| c.title.as_deref())
            .unwrap_or("Total Sales by Product")
    }

    fn chart_size(&self) -> (u32, u32) {
        let chart = self.chart.as_ref();
        (
            chart.and_then(|c| c.width).unwrap_or(1000),
            chart.and_then(|c| c.height).unwrap_or(600),
        )
    }

    fn bar_color(&self) -> &str {
        self.chart
            .as_ref()
            .and_then(|c| c.bar_color.as_deref())
            .unwrap_or("skyblue")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider(self)?;
        validation::validate_non_empty_string("chart.bar_color", self.bar_color())
    }
}
