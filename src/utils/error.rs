use crate::domain::units::Measure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Invalid {measure} units: {from_unit} and {to_unit}")]
    InvalidUnit {
        measure: Measure,
        from_unit: String,
        to_unit: String,
        /// Codes that are not part of the domain's table.
        rejected: Vec<String>,
    },

    #[error("Invalid value {value}: {reason}")]
    InvalidValue { value: String, reason: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("CSRF validation failed: {reason}")]
    Csrf { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ConverterError {
    pub fn invalid_unit(measure: Measure, from_unit: &str, to_unit: &str) -> Self {
        let mut rejected = Vec::new();
        for code in [from_unit, to_unit] {
            if !measure.is_valid_code(code) && !rejected.iter().any(|r| r == code) {
                rejected.push(code.to_string());
            }
        }
        Self::InvalidUnit {
            measure,
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            rejected,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::InvalidRequest {
            message: format!("field '{field}' is required"),
        }
    }

    pub fn csrf(reason: impl Into<String>) -> Self {
        Self::Csrf {
            reason: reason.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidValue { .. } | Self::InvalidRequest { .. } => 400,
            Self::Csrf { .. } => 403,
            Self::InvalidUnit { .. } => 422,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => 500,
        }
    }

    /// Stable machine-readable code used in error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUnit { .. } => "invalid_unit",
            Self::InvalidValue { .. } => "invalid_value",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Csrf { .. } => "csrf_failed",
            _ => "internal_error",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidUnit { rejected, .. } if !rejected.is_empty() => {
                format!("{} (unknown: {})", self, rejected.join(", "))
            }
            Self::IoError(e) => format!("File system error: {e}"),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                format!("{self}. Check the configuration file and command line flags.")
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_unit_lists_rejected_codes() {
        match ConverterError::invalid_unit(Measure::Length, "xx", "m") {
            ConverterError::InvalidUnit { rejected, .. } => assert_eq!(rejected, vec!["xx"]),
            other => panic!("unexpected: {other:?}"),
        }
        match ConverterError::invalid_unit(Measure::Weight, "xx", "xx") {
            ConverterError::InvalidUnit { rejected, .. } => assert_eq!(rejected, vec!["xx"]),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_message_names_both_codes() {
        let err = ConverterError::invalid_unit(Measure::Temperature, "C", "Q");
        assert_eq!(err.to_string(), "Invalid temperature units: C and Q");
        assert_eq!(
            err.user_friendly_message(),
            "Invalid temperature units: C and Q (unknown: Q)"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ConverterError::invalid_unit(Measure::Length, "a", "b").status_code(), 422);
        assert_eq!(ConverterError::missing_field("to_unit").status_code(), 400);
        assert_eq!(ConverterError::csrf("missing token").status_code(), 403);
        assert!(!ConverterError::ConfigError {
            message: "boom".to_string()
        }
        .is_client_error());
    }
}
