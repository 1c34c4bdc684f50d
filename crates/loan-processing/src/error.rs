//! Custom error types for the preprocessing pipeline.
//!
//! This module provides the error hierarchy using `thiserror` for the
//! loader, the fitted transforms and the pipeline stages.
//!
//! Errors serialize as a `{ code, message }` struct so that the CLI can
//! include them verbatim in its JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    /// The input dataset could not be loaded. Aborts the whole pipeline.
    #[error("Failed to load dataset '{path}': {reason}")]
    Load { path: String, reason: String },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A label encoder was asked to transform a value it was not fitted on.
    #[error("Unseen label '{label}' in column '{column}'")]
    UnseenLabel { column: String, label: String },

    /// An encoded integer has no class in the fitted encoder.
    #[error("Code {code} is out of range for column '{column}' ({classes} classes)")]
    UnknownCode {
        column: String,
        code: u32,
        classes: usize,
    },

    /// A transform was used before it was fitted.
    #[error("Transform '{0}' has not been fitted")]
    NotFitted(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PreprocessingError>,
    },
}

impl PreprocessingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PreprocessingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, preserved through any added context.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::UnseenLabel { .. } => "UNSEEN_LABEL",
            Self::UnknownCode { .. } => "UNKNOWN_CODE",
            Self::NotFitted(_) => "NOT_FITTED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a load failure, the only one that aborts
    /// the pipeline before any transform runs.
    pub fn is_load_failure(&self) -> bool {
        match self {
            Self::Load { .. } => true,
            Self::WithContext { source, .. } => source.is_load_failure(),
            _ => false,
        }
    }
}

impl Serialize for PreprocessingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PreprocessingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<crate::config::ConfigValidationError> for PreprocessingError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        PreprocessingError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PreprocessingError::Polars(e).with_context(context))
    }
}
