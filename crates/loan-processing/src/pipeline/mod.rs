//! Pipeline module.
//!
//! This module provides the main preprocessing pipeline and related components.

mod builder;
pub mod outliers;
pub mod progress;

pub use builder::{Preprocessor, PreprocessorBuilder};
pub use outliers::OutlierHandler;
pub use progress::{
    ClosureProgressReporter, PreprocessingStage, ProgressReporter, ProgressUpdate,
};
