use thiserror::Error;

/// A title string with no course-code-shaped token.
///
/// Fatal for the record it belongs to: every other field has an empty or
/// sentinel representation, the code does not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no course code found in title: {title:?}")]
pub struct TitleParseError {
    pub title: String,
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Title parse error on line {line}: {source}")]
    TitleParse {
        line: usize,
        #[source]
        source: TitleParseError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Parsing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Fixable by correcting the configuration and re-running.
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code reported by the binaries.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::TomlParseError(_) => ErrorCategory::Configuration,
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Input,
            EtlError::TitleParse { .. } => ErrorCategory::Parsing,
            EtlError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Parsing => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::CsvError(_) => {
                "Check that the input is a two-column dataset (title, description)".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the input file exists and the output path is writable".to_string()
            }
            EtlError::SerializationError(_) => "Re-run with --verbose and report the record".to_string(),
            EtlError::TomlParseError(_) => "Fix the TOML syntax in the configuration file".to_string(),
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => {
                "Review the configuration values and try again".to_string()
            }
            EtlError::TitleParse { line, .. } => format!(
                "Fix the title on line {} or run without strict mode to skip it",
                line
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::TitleParse { line, source } => format!(
                "Record on line {} has no course code: {:?}",
                line, source.title
            ),
            EtlError::IoError(e) => format!("Could not read or write a file: {}", e),
            EtlError::CsvError(e) => format!("Could not read the input dataset: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_parse_error_is_parsing_category() {
        let err = EtlError::TitleParse {
            line: 7,
            source: TitleParseError {
                title: "Special Topics".to_string(),
            },
        };

        assert_eq!(err.category(), ErrorCategory::Parsing);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("line 7"));
        assert!(err.recovery_suggestion().contains("strict"));
    }

    #[test]
    fn test_config_errors_map_to_configuration() {
        let err = EtlError::MissingConfigError {
            field: "source.input_path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Missing required configuration: source.input_path");
    }

    #[test]
    fn test_every_severity_exits_non_zero() {
        let config = EtlError::ConfigValidationError {
            field: "output_formats".to_string(),
            message: "empty".to_string(),
        };
        let input = EtlError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "raw_data.csv",
        ));
        let output = EtlError::SerializationError(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        );

        assert_eq!(config.severity().exit_code(), 2);
        assert_eq!(input.severity().exit_code(), 1);
        assert_eq!(output.severity(), ErrorSeverity::Critical);
        assert_eq!(output.severity().exit_code(), 3);
    }
}
