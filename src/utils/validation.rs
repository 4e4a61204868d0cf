use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};

pub const MIN_CHART_PX: u32 = 200;
pub const MAX_CHART_PX: u32 = 4000;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extension: &str) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if ext.eq_ignore_ascii_case(allowed_extension) => Ok(()),
        Some(ext) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Expected: {}",
                ext, allowed_extension
            ),
        }),
        None => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("input", config.input_path())?;
    validate_path("output_path", config.output_path())?;
    validate_path("report_file", config.report_file())?;
    validate_path("chart_file", config.chart_file())?;
    validate_file_extension("report_file", config.report_file(), "txt")?;
    validate_file_extension("chart_file", config.chart_file(), "svg")?;
    validate_non_empty_string("currency", config.currency_symbol())?;

    let (width, height) = config.chart_size();
    validate_range("chart.width", width, MIN_CHART_PX, MAX_CHART_PX)?;
    validate_range("chart.height", height, MIN_CHART_PX, MAX_CHART_PX)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "sample_data.csv").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("chart_file", "chart.svg", "svg").is_ok());
        assert!(validate_file_extension("chart_file", "CHART.SVG", "svg").is_ok());
        assert!(validate_file_extension("chart_file", "chart.png", "svg").is_err());
        assert!(validate_file_extension("chart_file", "chart", "svg").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("chart.width", 1000u32, MIN_CHART_PX, MAX_CHART_PX).is_ok());
        assert!(validate_range("chart.width", 50u32, MIN_CHART_PX, MAX_CHART_PX).is_err());
        assert!(validate_range("chart.height", 5000u32, MIN_CHART_PX, MAX_CHART_PX).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("currency", "£").is_ok());
        assert!(validate_non_empty_string("currency", "  ").is_err());
    }
}
