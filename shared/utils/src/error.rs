use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AuditError {
    /// A required input (report folder, prefixed spreadsheet, equivalence
    /// table) is absent. Fatal before any extraction starts.
    #[error("Missing required input: {path}")]
    MissingInput { path: String },

    /// A reference spreadsheet does not match the expected schema.
    #[error("Spreadsheet schema error in {file}: {message}")]
    Schema { file: String, message: String },

    /// A panel report PDF could not be read or decoded.
    #[error("Document error in {file}: {message}")]
    Document { file: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuditError {
    pub fn missing_input(path: impl Into<String>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn schema(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn document(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Document {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "MISSING_INPUT",
            Self::Schema { .. } => "SCHEMA_ERROR",
            Self::Document { .. } => "DOCUMENT_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type AuditResult<T> = Result<T, AuditError>;

// Conversion from common error types
impl From<std::io::Error> for AuditError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for AuditError {
    fn from(error: csv::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for AuditError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
