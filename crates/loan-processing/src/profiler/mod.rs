//! Dataset profiling.
//!
//! This module provides the read-only exploratory overview and the
//! numeric/categorical feature partition used by the later stages.

pub(crate) mod statistics;
mod type_inference;

use crate::error::Result;
use crate::types::{ColumnOverview, DatasetOverview, FeatureTypes};
use polars::prelude::*;

pub(crate) use type_inference::identify_feature_types;

/// Number of leading rows rendered in the overview.
const HEAD_ROWS: usize = 5;

/// Data profiler for the exploratory overview and feature typing.
pub struct DataProfiler;

impl DataProfiler {
    /// Summarize shape, dtypes, missing values and duplicate rows.
    ///
    /// Does not mutate the dataset.
    pub fn overview(df: &DataFrame) -> Result<DatasetOverview> {
        let columns = df
            .get_columns()
            .iter()
            .map(|column| ColumnOverview {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                null_count: column.null_count(),
            })
            .collect();

        let duplicate_count = if df.width() == 0 {
            0
        } else {
            df.height()
                - df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
                    .height()
        };

        Ok(DatasetOverview {
            shape: (df.height(), df.width()),
            columns,
            duplicate_count,
            head: format!("{}", df.head(Some(HEAD_ROWS))),
        })
    }

    /// Partition the columns into numeric and categorical features.
    pub fn feature_types(df: &DataFrame) -> FeatureTypes {
        identify_feature_types(df)
    }
}
