use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-column entry of the exploratory overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

/// Read-only exploratory summary computed right after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub shape: (usize, usize),
    pub columns: Vec<ColumnOverview>,
    pub duplicate_count: usize,
    /// First rows of the dataset rendered as a table.
    pub head: String,
}

impl DatasetOverview {
    /// Total number of missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }
}

impl fmt::Display for DatasetOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.shape.0, self.shape.1)?;
        writeln!(f, "Columns:")?;
        for column in &self.columns {
            writeln!(
                f,
                "  {:<24} {:<10} missing: {}",
                column.name, column.dtype, column.null_count
            )?;
        }
        writeln!(f, "Duplicate rows: {}", self.duplicate_count)?;
        writeln!(f, "First rows:")?;
        write!(f, "{}", self.head)
    }
}

/// Numeric/categorical partition of the feature columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTypes {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

/// Fitted standardization parameters of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnScale {
    pub mean: f64,
    /// Population standard deviation of the fitted values.
    pub std: f64,
    /// Divisor applied on transform; 1.0 when `std` is zero.
    pub scale: f64,
}

impl ColumnScale {
    pub fn is_constant(&self) -> bool {
        self.std == 0.0
    }
}

/// One sequential IQR filtering pass over a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierPass {
    pub column: String,
    /// `None` when the column had no values left to compute quartiles from.
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl OutlierPass {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Summary of a completed preprocessing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessingSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    /// Identifier column that was dropped, if it was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_identifier: Option<String>,
    pub feature_types: FeatureTypes,
    pub scaling: BTreeMap<String, ColumnScale>,
    pub outlier_passes: Vec<OutlierPass>,
    /// Encoder classes per categorical column, in code order.
    pub encodings: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub duration_ms: u64,
    /// RFC 3339 timestamp of completion.
    pub completed_at: String,
}

impl PreprocessingSummary {
    pub fn outlier_rows_removed(&self) -> usize {
        self.outlier_passes.iter().map(OutlierPass::rows_removed).sum()
    }
}

/// Result of [`crate::Preprocessor::preprocess`].
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The model-ready dataset.
    pub data: DataFrame,
    pub overview: DatasetOverview,
    pub summary: PreprocessingSummary,
}
