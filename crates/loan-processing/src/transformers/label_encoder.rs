use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maps the distinct values of one categorical column to `0..k`.
///
/// Classes are the distinct non-null values in lexicographic order, so the
/// mapping depends only on the set of values seen while fitting. Nulls are
/// not a class and stay null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    column: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Self::default()
        }
    }

    /// Learn the classes from `series`, replacing any previous fit.
    pub fn fit(&mut self, series: &Series) -> Result<&mut Self> {
        let strings = series.cast(&DataType::String)?;
        let distinct: BTreeSet<&str> = strings.str()?.into_iter().flatten().collect();

        self.classes = distinct.into_iter().map(str::to_string).collect();
        Ok(self)
    }

    /// Encode `series` as `UInt32` codes.
    ///
    /// Fails with [`PreprocessingError::UnseenLabel`] on a value outside the
    /// fitted classes.
    pub fn transform(&self, series: &Series) -> Result<Series> {
        let strings = series.cast(&DataType::String)?;
        let codes = strings
            .str()?
            .into_iter()
            .map(|opt_val| opt_val.map(|val| self.code_of(val)).transpose())
            .collect::<Result<Vec<Option<u32>>>>()?;

        Ok(Series::new(series.name().clone(), codes))
    }

    pub fn fit_transform(&mut self, series: &Series) -> Result<Series> {
        self.fit(series)?;
        self.transform(series)
    }

    /// Decode `UInt32` codes back into the original string values.
    pub fn inverse_transform(&self, series: &Series) -> Result<Series> {
        let codes = series.cast(&DataType::UInt32)?;
        let labels = codes
            .u32()?
            .into_iter()
            .map(|opt_code| opt_code.map(|code| self.label_of(code)).transpose())
            .collect::<Result<Vec<Option<&str>>>>()?;

        Ok(Series::new(series.name().clone(), labels))
    }

    /// Column this encoder was created for.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Fitted classes in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    // classes are sorted, so the code is the binary search position
    fn code_of(&self, label: &str) -> Result<u32> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map(|code| code as u32)
            .map_err(|_| PreprocessingError::UnseenLabel {
                column: self.column.clone(),
                label: label.to_string(),
            })
    }

    fn label_of(&self, code: u32) -> Result<&str> {
        self.classes
            .get(code as usize)
            .map(String::as_str)
            .ok_or_else(|| PreprocessingError::UnknownCode {
                column: self.column.clone(),
                code,
                classes: self.classes.len(),
            })
    }
}
