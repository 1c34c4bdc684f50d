//! Loan Approval Preprocessing Library
//!
//! Turns the raw loan approval CSV into a model-ready table, built with Rust
//! and Polars.
//!
//! # Overview
//!
//! The [`Preprocessor`] runs a fixed sequence of stages:
//!
//! - **Loading**: CSV with header row, with lenient fallbacks for malformed quoting
//! - **Exploration**: Shape, column types, missing values, duplicates and first rows
//! - **Identifier Removal**: Drops the identifier column (`loan_id` by default)
//! - **Feature Typing**: Numeric versus categorical partition by column dtype
//! - **Standardization**: Zero mean, unit population variance per numeric column
//! - **Outlier Removal**: Sequential 1.5 x IQR filtering over the numeric columns
//! - **Encoding**: Sorted-class label encoding of categorical columns
//! - **Persisting**: Optional CSV output without an index column
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use loan_processing::{Preprocessor, PreprocessorConfig};
//! use std::path::Path;
//!
//! // Option 1: Default configuration
//! let mut preprocessor = Preprocessor::new();
//! let result = preprocessor.preprocess(
//!     "loanapproval_raw.csv",
//!     Some(Path::new("loanapproval_preprocessing.csv")),
//! )?;
//!
//! // Option 2: Custom configuration and progress reporting
//! let config = PreprocessorConfig::builder()
//!     .identifier_column("application_id")
//!     .iqr_multiplier(3.0)
//!     .build()?;
//!
//! let mut preprocessor = Preprocessor::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//! let result = preprocessor.preprocess("applications.csv", None)?;
//!
//! println!("Shape: {:?}", result.data.shape());
//! println!("Outlier rows removed: {}", result.summary.outlier_rows_removed());
//! ```
//!
//! # Fitted State
//!
//! After a run the preprocessor keeps its fitted [`StandardScaler`] and one
//! [`LabelEncoder`] per categorical column, so encoded values can be mapped
//! back:
//!
//! ```rust,ignore
//! let encoder = preprocessor.label_encoder("employment_type").unwrap();
//! let labels = encoder.inverse_transform(result.data.column("employment_type")?.as_materialized_series())?;
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod profiler;
pub mod transformers;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, PreprocessorConfig, PreprocessorConfigBuilder};
pub use error::{PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use io::{load_csv, write_csv};
pub use pipeline::{
    ClosureProgressReporter, OutlierHandler, PreprocessingStage, Preprocessor,
    PreprocessorBuilder, ProgressReporter, ProgressUpdate,
};
pub use profiler::DataProfiler;
pub use transformers::{LabelEncoder, StandardScaler};
pub use types::{
    ColumnOverview, ColumnScale, DatasetOverview, FeatureTypes, OutlierPass, PipelineResult,
    PreprocessingSummary,
};
pub use utils::{DtypeCategory, get_dtype_category, is_numeric_dtype};
