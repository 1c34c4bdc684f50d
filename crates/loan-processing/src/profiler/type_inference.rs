//! Feature typing from the dtypes inferred at load time.

use crate::types::FeatureTypes;
use crate::utils::{DtypeCategory, get_dtype_category};
use polars::prelude::*;
use tracing::debug;

/// Partition the columns of `df` into numeric and categorical features.
///
/// The partition follows the dtype the CSV reader inferred: integer and float
/// columns are numeric, string columns are categorical. Anything else
/// (booleans, temporal types) is in neither list. Column order is preserved.
pub(crate) fn identify_feature_types(df: &DataFrame) -> FeatureTypes {
    let mut feature_types = FeatureTypes::default();

    for column in df.get_columns() {
        let name = column.name().to_string();
        match get_dtype_category(column.dtype()) {
            DtypeCategory::Numeric => feature_types.numeric.push(name),
            DtypeCategory::String => feature_types.categorical.push(name),
            DtypeCategory::Other => {
                debug!("Column '{}' ({}) left untyped", name, column.dtype());
            }
        }
    }

    feature_types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_by_dtype() {
        let df = df![
            "income" => [5000i64, 6000, 7000],
            "employment_type" => ["Salaried", "Self-Employed", "Salaried"],
            "rate" => [0.1f64, 0.2, 0.3],
            "approved" => ["Yes", "No", "Yes"],
        ]
        .unwrap();

        let types = identify_feature_types(&df);
        assert_eq!(types.numeric, vec!["income", "rate"]);
        assert_eq!(types.categorical, vec!["employment_type", "approved"]);
    }

    #[test]
    fn test_boolean_column_is_untyped() {
        let df = df![
            "flag" => [true, false, true],
            "age" => [30i64, 40, 50],
        ]
        .unwrap();

        let types = identify_feature_types(&df);
        assert_eq!(types.numeric, vec!["age"]);
        assert!(types.categorical.is_empty());
    }

    #[test]
    fn test_empty_dataframe() {
        let types = identify_feature_types(&DataFrame::empty());
        assert!(types.numeric.is_empty());
        assert!(types.categorical.is_empty());
    }
}
