use crate::error::{PreprocessingError, Result};
use crate::profiler::statistics::mean_and_population_std;
use crate::types::ColumnScale;
use crate::utils::non_null_f64_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Standardizes numeric columns to zero mean and unit variance.
///
/// Parameters are learned per column by [`fit`](Self::fit) and reused by
/// [`transform`](Self::transform) and [`inverse_transform`](Self::inverse_transform).
/// Nulls and NaN are ignored when fitting and pass through unchanged when
/// transforming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    params: Vec<(String, ColumnScale)>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn mean and scale for each of `columns`, replacing any previous fit.
    pub fn fit(&mut self, df: &DataFrame, columns: &[String]) -> Result<&mut Self> {
        let mut params = Vec::with_capacity(columns.len());

        for name in columns {
            let column = df
                .column(name)
                .map_err(|_| PreprocessingError::ColumnNotFound(name.clone()))?;
            let values = non_null_f64_values(column.as_materialized_series())?;

            let column_scale = match mean_and_population_std(&values) {
                Some((mean, std)) => ColumnScale {
                    mean,
                    std,
                    scale: if std == 0.0 { 1.0 } else { std },
                },
                None => ColumnScale {
                    mean: 0.0,
                    std: 0.0,
                    scale: 1.0,
                },
            };

            debug!(
                "Fitted scaler for '{}': mean={:.6}, scale={:.6}",
                name, column_scale.mean, column_scale.scale
            );
            params.push((name.clone(), column_scale));
        }

        self.params = params;
        Ok(self)
    }

    /// Rewrite every fitted column of `df` in place as standardized `Float64`.
    pub fn transform(&self, df: &mut DataFrame) -> Result<()> {
        self.ensure_fitted()?;
        for (name, params) in &self.params {
            self.map_column(df, name, |v| (v - params.mean) / params.scale)?;
        }
        Ok(())
    }

    /// Fit on `columns` of `df`, then transform them in place.
    pub fn fit_transform(&mut self, df: &mut DataFrame, columns: &[String]) -> Result<()> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Undo the standardization of every fitted column in place.
    pub fn inverse_transform(&self, df: &mut DataFrame) -> Result<()> {
        self.ensure_fitted()?;
        for (name, params) in &self.params {
            self.map_column(df, name, |v| v * params.scale + params.mean)?;
        }
        Ok(())
    }

    /// Fitted parameters of a column.
    pub fn params(&self, column: &str) -> Option<&ColumnScale> {
        self.params
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, params)| params)
    }

    /// Fitted columns in fit order with their parameters.
    pub fn fitted_columns(&self) -> impl Iterator<Item = (&str, &ColumnScale)> {
        self.params.iter().map(|(name, params)| (name.as_str(), params))
    }

    pub fn is_fitted(&self) -> bool {
        !self.params.is_empty()
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.is_fitted() {
            Ok(())
        } else {
            Err(PreprocessingError::NotFitted("StandardScaler".to_string()))
        }
    }

    fn map_column<F>(&self, df: &mut DataFrame, name: &str, f: F) -> Result<()>
    where
        F: Fn(f64) -> f64,
    {
        let column = df
            .column(name)
            .map_err(|_| PreprocessingError::ColumnNotFound(name.to_string()))?;
        let float_series = column.as_materialized_series().cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = float_series
            .f64()?
            .into_iter()
            .map(|opt_val| opt_val.map(&f))
            .collect();

        df.replace(name, Series::new(name.into(), values))?;
        Ok(())
    }
}
