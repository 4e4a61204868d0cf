use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: String },

    #[error("Malformed data: {message}")]
    MalformedData { message: String },

    #[error("Dataset is empty after cleaning")]
    EmptyDataset,

    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
    System,
}

impl EtlError {
    pub fn malformed(message: impl Into<String>) -> Self {
        EtlError::MalformedData {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SourceNotFound { .. } => ErrorCategory::Input,
            EtlError::MalformedData { .. } | EtlError::EmptyDataset | EtlError::CsvError(_) => {
                ErrorCategory::Data
            }
            EtlError::WriteFailure { .. } => ErrorCategory::Output,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Message shown to the user on the console. Missing input gets its own
    /// wording; everything else falls through to the error description.
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::SourceNotFound { path } => format!("Error: {} file not found.", path),
            other => format!("An error occurred: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::SourceNotFound { .. } => {
                "Please make sure the data file exists in the same folder."
            }
            EtlError::MalformedData { .. } | EtlError::CsvError(_) => {
                "Check that the file has Date, Product and Sales columns with valid values."
            }
            EtlError::EmptyDataset => "The input has no complete rows; add data and run again.",
            EtlError::WriteFailure { .. } => {
                "Check that the output directory exists and is writable."
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line flags or the TOML configuration file."
            }
            EtlError::IoError(_) => "Retry the run; if it keeps failing check disk and permissions.",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
