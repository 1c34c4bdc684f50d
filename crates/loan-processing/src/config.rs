//! Configuration types for the preprocessing pipeline.
//!
//! Everything that would otherwise be ambient process state (which column is
//! the identifier, the outlier fence multiplier, whether warnings are emitted)
//! is passed explicitly through [`PreprocessorConfig`].

use serde::{Deserialize, Serialize};

/// Name of the identifier column in the raw loan approval dataset.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "loan_id";

/// Tukey fence multiplier used for IQR outlier removal.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Configuration for the preprocessing pipeline.
///
/// Use [`PreprocessorConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use loan_processing::config::PreprocessorConfig;
///
/// let config = PreprocessorConfig::builder()
///     .identifier_column("application_id")
///     .emit_warnings(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Column dropped before feature typing when present.
    /// Default: "loan_id"
    pub identifier_column: String,

    /// Multiplier applied to the IQR to build the outlier bounds.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Number of rows the CSV reader inspects to infer column types.
    /// `None` scans the whole file, so a late float or text value still
    /// widens the column type.
    /// Default: None
    pub infer_schema_length: Option<usize>,

    /// Field separator for both reading and writing.
    /// Default: b','
    pub separator: u8,

    /// Whether pipeline warnings (e.g. zero-variance columns) are logged.
    /// Default: true
    pub emit_warnings: bool,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            infer_schema_length: None,
            separator: b',',
            emit_warnings: true,
        }
    }
}

impl PreprocessorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PreprocessorConfigBuilder {
        PreprocessorConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.identifier_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyIdentifierColumn);
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::InvalidSchemaLength(0));
        }

        if !self.separator.is_ascii() || self.separator == b'"' || self.separator == b'\n' {
            return Err(ConfigValidationError::InvalidSeparator(self.separator));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Identifier column name must not be empty")]
    EmptyIdentifierColumn,

    #[error("Invalid IQR multiplier: {0} (must be finite and greater than 0)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid schema inference length: {0} (must be at least 1)")]
    InvalidSchemaLength(usize),

    #[error("Invalid separator byte: {0:#04x}")]
    InvalidSeparator(u8),
}

/// Builder for [`PreprocessorConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PreprocessorConfigBuilder {
    identifier_column: Option<String>,
    iqr_multiplier: Option<f64>,
    infer_schema_length: Option<Option<usize>>,
    separator: Option<u8>,
    emit_warnings: Option<bool>,
}

impl PreprocessorConfigBuilder {
    /// Set the identifier column dropped before feature typing.
    pub fn identifier_column(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = Some(column.into());
        self
    }

    /// Set the IQR multiplier used for the outlier bounds.
    ///
    /// # Arguments
    /// * `multiplier` - Positive finite value (1.5 is Tukey's fence)
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set how many rows the CSV reader inspects for type inference.
    ///
    /// # Arguments
    /// * `rows` - Row limit, or `None` to scan the whole file
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Set the field separator.
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Enable or disable pipeline warnings.
    pub fn emit_warnings(mut self, emit: bool) -> Self {
        self.emit_warnings = Some(emit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PreprocessorConfig` or an error if validation fails.
    pub fn build(self) -> Result<PreprocessorConfig, ConfigValidationError> {
        let defaults = PreprocessorConfig::default();
        let config = PreprocessorConfig {
            identifier_column: self
                .identifier_column
                .unwrap_or(defaults.identifier_column),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(defaults.infer_schema_length),
            separator: self.separator.unwrap_or(defaults.separator),
            emit_warnings: self.emit_warnings.unwrap_or(defaults.emit_warnings),
        };

        config.validate()?;
        Ok(config)
    }
}
