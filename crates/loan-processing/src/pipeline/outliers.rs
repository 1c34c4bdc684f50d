//! Outlier handling module.
//!
//! Removes rows whose numeric values fall outside the IQR fences. Columns are
//! filtered one after another: each column's quartiles are computed on the
//! rows that survived the previous columns.

use crate::error::{PreprocessingError, Result};
use crate::profiler::statistics::quartiles;
use crate::types::OutlierPass;
use crate::utils::sorted_values;
use polars::prelude::*;
use tracing::debug;

/// Handles IQR outlier detection and removal.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Filter `df` by the IQR bounds of each of `columns`, in order.
    ///
    /// `on_pass` is called after each column with the column's index and its
    /// [`OutlierPass`]. Returns one pass per column. The row count never grows
    /// from one pass to the next.
    pub fn remove_outliers<F>(
        df: &mut DataFrame,
        columns: &[String],
        multiplier: f64,
        mut on_pass: F,
    ) -> Result<Vec<OutlierPass>>
    where
        F: FnMut(usize, &OutlierPass),
    {
        let original_rows = df.height();
        let mut passes = Vec::with_capacity(columns.len());

        for (idx, column) in columns.iter().enumerate() {
            let pass = Self::remove_column_outliers(df, column, multiplier)?;
            on_pass(idx, &pass);
            passes.push(pass);
        }

        let rows_removed = original_rows - df.height();
        if rows_removed > 0 {
            debug!("Removed {} outlier rows", rows_removed);
        }

        Ok(passes)
    }

    /// Filter `df` by the IQR bounds of a single column.
    ///
    /// Rows whose value is null or NaN never satisfy the bounds and are
    /// removed. A column with no values left yields no bounds and removes
    /// every row.
    pub fn remove_column_outliers(
        df: &mut DataFrame,
        column: &str,
        multiplier: f64,
    ) -> Result<OutlierPass> {
        let rows_before = df.height();
        let series = df
            .column(column)
            .map_err(|_| PreprocessingError::ColumnNotFound(column.to_string()))?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let f64_chunked = series.f64()?;

        let present: Vec<f64> = f64_chunked
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        let sorted = sorted_values(present);

        let fences = quartiles(&sorted).map(|(q1, q3)| {
            let iqr = q3 - q1;
            (q1, q3, q1 - multiplier * iqr, q3 + multiplier * iqr)
        });

        let mask_values: Vec<bool> = f64_chunked
            .into_iter()
            .map(|opt_val| match (opt_val, fences) {
                (Some(val), Some((_, _, lower, upper))) => val >= lower && val <= upper,
                _ => false,
            })
            .collect();

        let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
        *df = df.filter(&mask)?;

        let pass = OutlierPass {
            column: column.to_string(),
            q1: fences.map(|f| f.0),
            q3: fences.map(|f| f.1),
            lower_bound: fences.map(|f| f.2),
            upper_bound: fences.map(|f| f.3),
            rows_before,
            rows_after: df.height(),
        };

        debug!(
            "IQR pass on '{}': bounds [{:?}, {:?}], {} -> {} rows",
            column, pass.lower_bound, pass.upper_bound, rows_before, pass.rows_after
        );

        Ok(pass)
    }
}
