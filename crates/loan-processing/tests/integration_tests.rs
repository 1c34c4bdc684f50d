//! Integration tests for the loan approval preprocessing pipeline.
//!
//! These tests run the full pipeline against the CSV fixtures.

use loan_processing::{
    PreprocessingStage, Preprocessor, PreprocessorConfig, ProgressUpdate, load_csv,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> PathBuf {
    fixtures_path().join(filename)
}

fn u32_codes(df: &DataFrame, column: &str) -> Vec<Option<u32>> {
    df.column(column)
        .unwrap()
        .u32()
        .unwrap()
        .into_iter()
        .collect()
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_loan_sample() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .expect("Pipeline should complete successfully");

    let df = &result.data;
    assert_eq!(
        df.get_column_names_str(),
        vec![
            "age",
            "income",
            "loan_amount",
            "credit_score",
            "employment_type",
            "education",
            "loan_approved"
        ]
    );

    // income 950000 (L013) and credit_score 300 (L014) fall outside the fences
    assert_eq!(df.height(), 18);
    assert_eq!(result.summary.rows_before, 20);
    assert_eq!(result.summary.columns_before, 8);
    assert_eq!(result.summary.columns_after, 7);
    assert_eq!(result.summary.outlier_rows_removed(), 2);

    for numeric in ["age", "income", "loan_amount", "credit_score"] {
        assert_eq!(df.column(numeric).unwrap().dtype(), &DataType::Float64);
    }
    for categorical in ["employment_type", "education", "loan_approved"] {
        assert_eq!(df.column(categorical).unwrap().dtype(), &DataType::UInt32);
    }
}

#[test]
fn test_outlier_passes_follow_numeric_order() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .unwrap();

    let passes: Vec<(&str, usize, usize)> = result
        .summary
        .outlier_passes
        .iter()
        .map(|p| (p.column.as_str(), p.rows_before, p.rows_after))
        .collect();

    assert_eq!(
        passes,
        vec![
            ("age", 20, 20),
            ("income", 20, 19),
            ("loan_amount", 19, 19),
            ("credit_score", 19, 18),
        ]
    );
}

#[test]
fn test_feature_types_exclude_identifier() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .unwrap();

    assert_eq!(result.summary.dropped_identifier.as_deref(), Some("loan_id"));
    assert_eq!(
        preprocessor.numeric_features(),
        &["age", "income", "loan_amount", "credit_score"]
    );
    assert_eq!(
        preprocessor.categorical_features(),
        &["employment_type", "education", "loan_approved"]
    );
}

#[test]
fn test_encodings_are_sorted_classes() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .unwrap();

    assert_eq!(
        result.summary.encodings["employment_type"],
        vec!["Contract", "Salaried", "Self-Employed"]
    );
    assert_eq!(
        result.summary.encodings["education"],
        vec!["Graduate", "Not Graduate"]
    );
    assert_eq!(result.summary.encodings["loan_approved"], vec!["No", "Yes"]);

    // First surviving row is L001: Salaried, Graduate, Yes
    assert_eq!(u32_codes(&result.data, "employment_type")[0], Some(1));
    assert_eq!(u32_codes(&result.data, "education")[0], Some(0));
    assert_eq!(u32_codes(&result.data, "loan_approved")[0], Some(1));
}

#[test]
fn test_encoding_can_be_inverted() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .unwrap();

    let encoder = preprocessor.label_encoder("loan_approved").unwrap();
    let encoded = result
        .data
        .column("loan_approved")
        .unwrap()
        .as_materialized_series();
    let decoded = encoder.inverse_transform(encoded).unwrap();

    let labels: Vec<&str> = decoded.str().unwrap().into_iter().flatten().collect();
    assert_eq!(labels.len(), 18);
    assert_eq!(labels[0], "Yes");
    assert_eq!(labels[2], "No");
}

#[test]
fn test_scaler_params_fitted_before_outlier_removal() {
    let mut preprocessor = Preprocessor::new();
    preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .unwrap();

    // Mean over all 20 ages, including rows later dropped as outliers
    let age = preprocessor.scaler().params("age").unwrap();
    assert!((age.mean - 38.3).abs() < 1e-9);
    assert!(age.std > 0.0);
}

#[test]
fn test_pipeline_without_identifier_column() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_no_id.csv"), None)
        .unwrap();

    assert!(result.summary.dropped_identifier.is_none());
    assert_eq!(
        result.data.get_column_names_str(),
        vec!["age", "income", "employment_type", "loan_approved"]
    );
    // income 75000 is above the 74500 fence
    assert_eq!(result.data.height(), 4);
}

#[test]
fn test_pipeline_with_missing_values() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_with_nulls.csv"), None)
        .unwrap();

    // L002 has no income, L004 income is above the fence
    assert_eq!(result.data.height(), 4);
    assert_eq!(result.overview.total_missing(), 2);

    // Missing categorical values survive encoding as nulls
    let codes = u32_codes(&result.data, "employment_type");
    assert_eq!(codes, vec![Some(1), None, Some(0), Some(2)]);
}

#[test]
fn test_late_float_value_widens_column() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_late_float.csv"), None)
        .expect("A late float must not fail the load");

    // age is 30.5 on row 120, loan_term is "unknown" on row 130
    assert_eq!(result.summary.rows_before, 150);
    assert_eq!(result.data.height(), 150);
    assert_eq!(preprocessor.numeric_features(), &["age", "income"]);
    assert_eq!(
        preprocessor.categorical_features(),
        &["loan_term", "employment_type", "loan_approved"]
    );
    assert_eq!(
        result.summary.encodings["loan_term"],
        vec!["12", "24", "36", "unknown"]
    );
}

#[test]
fn test_missing_value_tokens_drop_only_their_rows() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_nan_tokens.csv"), None)
        .unwrap();

    // L003 has income NaN; L004 has employment_type NA and is kept
    assert_eq!(result.data.height(), 5);
    assert_eq!(result.overview.total_missing(), 2);

    let income = preprocessor.scaler().params("income").unwrap();
    assert!((income.mean - 55000.0).abs() < 1e-9);
    assert!(income.std.is_finite());

    let codes = u32_codes(&result.data, "employment_type");
    assert_eq!(codes, vec![Some(1), Some(2), None, Some(0), Some(1)]);
}

#[test]
fn test_custom_identifier_column() {
    let config = PreprocessorConfig::builder()
        .identifier_column("employment_type")
        .build()
        .unwrap();
    let mut preprocessor = Preprocessor::builder().config(config).build().unwrap();

    let result = preprocessor
        .preprocess(fixture("loan_approval_no_id.csv"), None)
        .unwrap();

    assert_eq!(
        result.summary.dropped_identifier.as_deref(),
        Some("employment_type")
    );
    assert_eq!(preprocessor.categorical_features(), &["loan_approved"]);
}

#[test]
fn test_in_memory_column_order_preserved() {
    let df = df![
        "loan_id" => ["A", "B", "C", "D"],
        "income" => [4200i64, 5100, 4800, 5300],
        "age" => [31i64, 45, 38, 29],
        "employment_type" => ["Salaried", "Contract", "Salaried", "Self-Employed"],
        "approved" => ["Yes", "No", "Yes", "No"],
    ]
    .unwrap();

    let mut preprocessor = Preprocessor::new();
    let result = preprocessor.process(df, None).unwrap();

    assert_eq!(
        result.data.get_column_names_str(),
        vec!["income", "age", "employment_type", "approved"]
    );
    assert_eq!(result.data.column("income").unwrap().dtype(), &DataType::Float64);
    assert_eq!(result.data.column("age").unwrap().dtype(), &DataType::Float64);
    assert_eq!(
        u32_codes(&result.data, "employment_type"),
        vec![Some(1), Some(0), Some(1), Some(2)]
    );
}

// ============================================================================
// Overview Tests
// ============================================================================

#[test]
fn test_overview_reflects_raw_dataset() {
    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), None)
        .unwrap();

    let overview = &result.overview;
    assert_eq!(overview.shape, (20, 8));
    assert_eq!(overview.columns.len(), 8);
    assert_eq!(overview.columns[0].name, "loan_id");
    assert_eq!(overview.duplicate_count, 0);
    assert_eq!(overview.total_missing(), 0);
    assert!(overview.head.contains("L001"));
}

// ============================================================================
// Output Tests
// ============================================================================

#[test]
fn test_output_written_without_index() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out/loanapproval_preprocessing.csv");

    let mut preprocessor = Preprocessor::new();
    let result = preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), Some(output.as_path()))
        .unwrap();

    assert!(output.exists());
    assert_eq!(
        result.summary.output_path.as_deref(),
        Some(output.display().to_string().as_str())
    );

    let text = std::fs::read_to_string(&output).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "age,income,loan_amount,credit_score,employment_type,education,loan_approved"
    );

    let reloaded = load_csv(&output, b',', None).unwrap();
    assert_eq!(reloaded.shape(), (18, 7));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_missing_input_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.csv");

    let mut preprocessor = Preprocessor::new();
    let err = preprocessor
        .preprocess(fixture("does_not_exist.csv"), Some(output.as_path()))
        .unwrap_err();

    assert!(err.is_load_failure());
    assert!(!output.exists());
}

// ============================================================================
// Progress Tests
// ============================================================================

#[test]
fn test_progress_stages_in_order() {
    let updates: Arc<Mutex<Vec<ProgressUpdate>>> = Arc::new(Mutex::new(Vec::new()));
    let updates_clone = updates.clone();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let mut preprocessor = Preprocessor::builder()
        .on_progress(move |update| {
            updates_clone.lock().unwrap().push(update);
        })
        .build()
        .unwrap();

    preprocessor
        .preprocess(fixture("loan_approval_sample.csv"), Some(output.as_path()))
        .unwrap();

    let updates = updates.lock().unwrap();
    let mut stages: Vec<PreprocessingStage> = updates.iter().map(|u| u.stage).collect();
    stages.dedup();

    let mut expected = PreprocessingStage::ORDERED.to_vec();
    expected.push(PreprocessingStage::Complete);
    assert_eq!(stages, expected);

    let progress: Vec<f32> = updates.iter().map(|u| u.progress).collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&1.0));
}
