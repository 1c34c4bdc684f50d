//! Progress reporting for the preprocessing pipeline.
//!
//! The pipeline emits a [`ProgressUpdate`] when each stage starts and, for
//! per-column stages, after each column.
//!
//! # Example
//!
//! ```rust,ignore
//! use loan_processing::Preprocessor;
//!
//! let mut preprocessor = Preprocessor::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the preprocessing pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreprocessingStage {
    /// Reading the CSV file
    Loading,
    /// Computing the exploratory overview
    Exploration,
    /// Dropping the identifier column
    IdentifierRemoval,
    /// Partitioning columns into numeric and categorical
    FeatureTyping,
    /// Fitting and applying the standard scaler
    Standardization,
    /// Sequential IQR filtering
    OutlierRemoval,
    /// Fitting and applying the label encoders
    Encoding,
    /// Writing the output CSV
    Persisting,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl PreprocessingStage {
    /// Stages that do work, in execution order.
    pub const ORDERED: [PreprocessingStage; 8] = [
        Self::Loading,
        Self::Exploration,
        Self::IdentifierRemoval,
        Self::FeatureTyping,
        Self::Standardization,
        Self::OutlierRemoval,
        Self::Encoding,
        Self::Persisting,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Exploration => "Exploring Dataset",
            Self::IdentifierRemoval => "Removing Identifier",
            Self::FeatureTyping => "Identifying Feature Types",
            Self::Standardization => "Standardizing Numeric Features",
            Self::OutlierRemoval => "Removing Outliers",
            Self::Encoding => "Encoding Categorical Features",
            Self::Persisting => "Saving Dataset",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the overall progress taken by this stage (0.0 - 1.0).
    ///
    /// Weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.15,
            Self::Exploration => 0.10,
            Self::IdentifierRemoval => 0.05,
            Self::FeatureTyping => 0.05,
            Self::Standardization => 0.15,
            Self::OutlierRemoval => 0.20,
            Self::Encoding => 0.15,
            Self::Persisting => 0.15,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Complete => 1.0,
            Self::Failed => 0.0,
            stage => Self::ORDERED
                .iter()
                .take_while(|s| *s != stage)
                .map(|s| s.weight())
                .sum(),
        }
    }
}

/// Progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: PreprocessingStage,

    /// Optional sub-stage description (e.g., "Column: income")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_stage: Option<String>,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,

    /// Number of items processed in current stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<usize>,

    /// Total items in current stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_total: Option<usize>,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage without sub-stage info.
    pub fn new(stage: PreprocessingStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            sub_stage: None,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    /// Creates a new progress update with item counts.
    pub fn with_items(
        stage: PreprocessingStage,
        sub_stage: impl Into<String>,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        let stage_progress = if total > 0 {
            current as f32 / total as f32
        } else {
            0.0
        };
        Self {
            sub_stage: Some(sub_stage.into()),
            items_processed: Some(current),
            items_total: Some(total),
            ..Self::new(stage, stage_progress, message)
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(PreprocessingStage::Complete, 1.0, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(PreprocessingStage::Failed, 0.0, message)
    }
}

/// Trait for receiving progress updates during preprocessing.
///
/// Implementations must be `Send + Sync` so a preprocessor holding one can
/// be moved to another thread.
pub trait ProgressReporter: Send + Sync {
    /// Called when progress is made during preprocessing.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(PreprocessingStage::Exploration, 0.5, "Exploring...");
        assert_eq!(update.stage, PreprocessingStage::Exploration);
        assert!(update.sub_stage.is_none());
        assert_eq!(update.stage_progress, 0.5);
        assert!((update.progress - 0.20).abs() < 1e-6);
        assert_eq!(update.message, "Exploring...");
    }

    #[test]
    fn test_progress_update_with_items() {
        let update = ProgressUpdate::with_items(
            PreprocessingStage::Encoding,
            "Column: employment_type",
            1,
            2,
            "Encoded employment_type",
        );
        assert_eq!(update.stage, PreprocessingStage::Encoding);
        assert_eq!(update.sub_stage, Some("Column: employment_type".to_string()));
        assert_eq!(update.stage_progress, 0.5);
        assert_eq!(update.items_processed, Some(1));
        assert_eq!(update.items_total, Some(2));
    }

    #[test]
    fn test_progress_update_complete() {
        let update = ProgressUpdate::complete("Done!");
        assert_eq!(update.stage, PreprocessingStage::Complete);
        assert_eq!(update.progress, 1.0);
        assert_eq!(update.stage_progress, 1.0);
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(PreprocessingStage::Loading, 0.0, "Test"));
        reporter.report(ProgressUpdate::complete("Done"));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stage_weights_sum() {
        let total_weight: f32 = PreprocessingStage::ORDERED.iter().map(|s| s.weight()).sum();
        assert!((total_weight - 1.0).abs() < 0.01, "Weights should sum to ~1.0");
    }

    #[test]
    fn test_base_progress_is_increasing() {
        let bases: Vec<f32> = PreprocessingStage::ORDERED
            .iter()
            .map(|s| s.base_progress())
            .collect();
        assert_eq!(bases[0], 0.0);
        assert!(bases.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_stage_json_values() {
        let stage_expectations = [
            (PreprocessingStage::Loading, "\"loading\""),
            (PreprocessingStage::IdentifierRemoval, "\"identifier_removal\""),
            (PreprocessingStage::OutlierRemoval, "\"outlier_removal\""),
            (PreprocessingStage::Complete, "\"complete\""),
        ];

        for (stage, expected_json) in stage_expectations {
            let json = serde_json::to_string(&stage).expect("Should serialize");
            assert_eq!(json, expected_json);
        }
    }

    #[test]
    fn test_progress_reporter_across_threads() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = Arc::new(ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let reporter_clone = reporter.clone();
        let handle = std::thread::spawn(move || {
            reporter_clone.report(ProgressUpdate::new(
                PreprocessingStage::Standardization,
                0.5,
                "Test from background thread",
            ));
        });

        handle.join().expect("Thread should not panic");
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
