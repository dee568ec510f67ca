use thiserror::Error;

/// Main error type for apienv operations
#[derive(Debug, Error)]
pub enum ApiEnvError {
    #[error("Missing required parameter: {name}")]
    MissingRequired { name: String },

    #[error("Invalid value for parameter {name}: '{raw}' is not a valid integer")]
    InvalidValue { name: String, raw: String },

    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("Duplicate parameter declaration: {name}")]
    DuplicateParameter { name: String },

    #[error("Type mismatch for parameter {name}: declared as {expected}")]
    TypeMismatch { name: String, expected: String },

    #[error("Configuration snapshot already initialized")]
    AlreadyInitialized,

    #[error("Env file error on line {line}: {details}")]
    EnvFile { line: usize, details: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ApiEnvError {
    pub fn missing_required<S: Into<String>>(name: S) -> Self {
        Self::MissingRequired { name: name.into() }
    }

    pub fn invalid_value<S: Into<String>, R: Into<String>>(name: S, raw: R) -> Self {
        Self::InvalidValue {
            name: name.into(),
            raw: raw.into(),
        }
    }

    pub fn unknown_parameter<S: Into<String>>(name: S) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    pub fn duplicate_parameter<S: Into<String>>(name: S) -> Self {
        Self::DuplicateParameter { name: name.into() }
    }

    pub fn type_mismatch<S: Into<String>, E: Into<String>>(name: S, expected: E) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
        }
    }

    pub fn env_file<S: Into<String>>(line: usize, details: S) -> Self {
        Self::EnvFile {
            line,
            details: details.into(),
        }
    }

    /// Stable snake_case name of the error kind, used in startup diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => "missing_required",
            Self::InvalidValue { .. } => "invalid_value",
            Self::UnknownParameter { .. } => "unknown_parameter",
            Self::DuplicateParameter { .. } => "duplicate_parameter",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::AlreadyInitialized => "already_initialized",
            Self::EnvFile { .. } => "env_file",
            Self::IoError(_) => "io",
            Self::JsonError(_) => "json",
            Self::YamlError(_) => "yaml",
        }
    }

    /// Name of the offending parameter, when the error concerns one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingRequired { name }
            | Self::InvalidValue { name, .. }
            | Self::UnknownParameter { name }
            | Self::DuplicateParameter { name }
            | Self::TypeMismatch { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type alias for apienv operations
pub type Result<T> = std::result::Result<T, ApiEnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_parameter() {
        let err = ApiEnvError::missing_required("TABLE_NAME");
        assert_eq!(err.to_string(), "Missing required parameter: TABLE_NAME");
        assert_eq!(err.kind(), "missing_required");
        assert_eq!(err.parameter(), Some("TABLE_NAME"));

        let err = ApiEnvError::invalid_value("SHOW_WARNINGS", "yes");
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter SHOW_WARNINGS: 'yes' is not a valid integer"
        );
        assert_eq!(err.kind(), "invalid_value");
    }

    #[test]
    fn test_non_parameter_errors() {
        let err = ApiEnvError::env_file(3, "missing '='");
        assert_eq!(err.kind(), "env_file");
        assert_eq!(err.parameter(), None);
        assert_eq!(ApiEnvError::AlreadyInitialized.kind(), "already_initialized");
    }
}
