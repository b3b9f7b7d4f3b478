//! Error types for dbml-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dbml-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unable to read DBML file {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse DBML file: {0}")]
    SchemaError(String),

    #[error("Invalid template {name}: {message}")]
    TemplateError { name: String, message: String },

    #[error("Error rendering {template} for table {table}: {message}")]
    RenderError {
        template: String,
        table: String,
        message: String,
    },

    #[error("Error writing {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error running {tool}: {message}")]
    ToolingError { tool: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CodegenError {
    /// Errors raised before any file is touched because required settings are absent.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CodegenError::ConfigError(_) | CodegenError::ValidationError(_)
        )
    }

    /// Errors raised while reading or parsing the schema document.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            CodegenError::SchemaRead { .. } | CodegenError::SchemaError(_)
        )
    }
}

impl From<roxmltree::Error> for CodegenError {
    fn from(err: roxmltree::Error) -> Self {
        CodegenError::SchemaError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
