//! Main preprocessing pipeline module.
//!
//! This module provides the stateful [`Preprocessor`] and its builder. The
//! preprocessor runs a fixed sequence of stages:
//!
//! 1. load the CSV
//! 2. log an exploratory overview
//! 3. drop the identifier column
//! 4. partition features into numeric and categorical
//! 5. standardize numeric features
//! 6. remove IQR outliers, one numeric column after another
//! 7. label-encode categorical features
//! 8. optionally write the result
//!
//! Fitted transforms are kept on the preprocessor after a run.

use crate::config::{ConfigValidationError, PreprocessorConfig};
use crate::error::{PreprocessingError, Result, ResultExt};
use crate::io::{load_csv, write_csv};
use crate::pipeline::outliers::OutlierHandler;
use crate::pipeline::progress::{
    ClosureProgressReporter, PreprocessingStage, ProgressReporter, ProgressUpdate,
};
use crate::profiler::DataProfiler;
use crate::transformers::{LabelEncoder, StandardScaler};
use crate::types::{DatasetOverview, FeatureTypes, OutlierPass, PipelineResult, PreprocessingSummary};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Stateful preprocessor for the loan approval dataset.
///
/// Use [`Preprocessor::builder()`] to customize configuration or attach a
/// progress reporter.
///
/// # Example
///
/// ```rust,ignore
/// use loan_processing::Preprocessor;
/// use std::path::Path;
///
/// let mut preprocessor = Preprocessor::new();
/// let result = preprocessor.preprocess(
///     "loanapproval_raw.csv",
///     Some(Path::new("loanapproval_preprocessing.csv")),
/// )?;
/// println!("Ready for training: {:?}", result.data.shape());
/// ```
pub struct Preprocessor {
    config: PreprocessorConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    scaler: StandardScaler,
    label_encoders: BTreeMap<String, LabelEncoder>,
    feature_types: FeatureTypes,
}

static_assertions::assert_impl_all!(Preprocessor: Send);

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    /// Create a preprocessor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PreprocessorConfig::default())
    }

    /// Create a preprocessor with an already validated configuration.
    fn with_config(config: PreprocessorConfig) -> Self {
        Self {
            config,
            progress_reporter: None,
            scaler: StandardScaler::new(),
            label_encoders: BTreeMap::new(),
            feature_types: FeatureTypes::default(),
        }
    }

    /// Create a new preprocessor builder.
    pub fn builder() -> PreprocessorBuilder {
        PreprocessorBuilder::default()
    }

    /// Run every stage on the CSV at `input`, writing the result to `output`
    /// when given.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessingError::Load`] if the input cannot be loaded, in
    /// which case no later stage runs.
    pub fn preprocess(
        &mut self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
    ) -> Result<PipelineResult> {
        info!("Starting automated preprocessing...");
        self.notify(ProgressUpdate::new(
            PreprocessingStage::Loading,
            0.0,
            "Loading dataset...",
        ));

        let outcome = self
            .load_data(input.as_ref())
            .and_then(|df| self.process_internal(df, output));
        self.finish(outcome)
    }

    /// Run stages 2 to 8 on an in-memory dataset.
    pub fn process(&mut self, df: DataFrame, output: Option<&Path>) -> Result<PipelineResult> {
        let outcome = self.process_internal(df, output);
        self.finish(outcome)
    }

    fn finish(&self, outcome: Result<PipelineResult>) -> Result<PipelineResult> {
        match outcome {
            Ok(result) => {
                info!(
                    "Preprocessing finished. Dataset ready for training with shape: {:?}",
                    result.data.shape()
                );
                self.notify(ProgressUpdate::complete("Preprocessing complete"));
                Ok(result)
            }
            Err(e) => {
                error!("Preprocessing failed: {}", e);
                self.notify(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn process_internal(
        &mut self,
        mut df: DataFrame,
        output: Option<&Path>,
    ) -> Result<PipelineResult> {
        let start_time = Instant::now();

        // Stage 2: exploratory overview
        self.notify(ProgressUpdate::new(
            PreprocessingStage::Exploration,
            0.0,
            "Exploring dataset...",
        ));
        let overview = self.explore(&df).context("During exploration")?;

        // Stage 3: identifier removal
        self.notify(ProgressUpdate::new(
            PreprocessingStage::IdentifierRemoval,
            0.0,
            "Removing identifier column...",
        ));
        let dropped_identifier = self
            .remove_identifier_column(&mut df)
            .context("During identifier removal")?;

        // Stage 4: feature typing
        self.notify(ProgressUpdate::new(
            PreprocessingStage::FeatureTyping,
            0.0,
            "Identifying feature types...",
        ));
        self.identify_feature_types(&df);

        // Stage 5: standardization
        self.notify(ProgressUpdate::new(
            PreprocessingStage::Standardization,
            0.0,
            "Standardizing numeric features...",
        ));
        self.standardize_numeric_features(&mut df)
            .context("During standardization")?;

        // Stage 6: outlier removal
        self.notify(ProgressUpdate::new(
            PreprocessingStage::OutlierRemoval,
            0.0,
            "Removing outliers...",
        ));
        let outlier_passes = self.remove_outliers(&mut df).context("During outlier removal")?;

        // Stage 7: categorical encoding
        self.notify(ProgressUpdate::new(
            PreprocessingStage::Encoding,
            0.0,
            "Encoding categorical features...",
        ));
        self.encode_categorical_features(&mut df)
            .context("During categorical encoding")?;

        // Stage 8: persist
        if let Some(path) = output {
            self.notify(ProgressUpdate::new(
                PreprocessingStage::Persisting,
                0.0,
                format!("Saving dataset to {}...", path.display()),
            ));
            self.save(&mut df, path).context("During saving")?;
        }

        let summary = PreprocessingSummary {
            rows_before: overview.shape.0,
            rows_after: df.height(),
            columns_before: overview.shape.1,
            columns_after: df.width(),
            dropped_identifier,
            feature_types: self.feature_types.clone(),
            scaling: self
                .scaler
                .fitted_columns()
                .map(|(name, params)| (name.to_string(), *params))
                .collect(),
            outlier_passes,
            encodings: self
                .label_encoders
                .iter()
                .map(|(name, encoder)| (name.clone(), encoder.classes().to_vec()))
                .collect(),
            output_path: output.map(|p| p.display().to_string()),
            duration_ms: start_time.elapsed().as_millis() as u64,
            completed_at: chrono::Utc::now().to_rfc3339(),
        };

        Ok(PipelineResult {
            data: df,
            overview,
            summary,
        })
    }

    /// Stage 1: load the CSV at `path`.
    pub fn load_data(&self, path: &Path) -> Result<DataFrame> {
        load_csv(path, self.config.separator, self.config.infer_schema_length)
    }

    /// Stage 2: compute and log the exploratory overview.
    pub fn explore(&self, df: &DataFrame) -> Result<DatasetOverview> {
        let overview = DataProfiler::overview(df)?;
        info!("Dataset overview:\n{}", overview);
        debug!("Total missing values: {}", overview.total_missing());
        Ok(overview)
    }

    /// Stage 3: drop the configured identifier column if present.
    ///
    /// Returns the dropped column name, or `None` when it was absent.
    pub fn remove_identifier_column(&self, df: &mut DataFrame) -> Result<Option<String>> {
        let identifier = self.config.identifier_column.as_str();
        let present = df
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == identifier);

        if !present {
            debug!("Identifier column '{}' not present", identifier);
            return Ok(None);
        }

        *df = df.drop(identifier)?;
        info!("Column '{}' removed", identifier);
        Ok(Some(identifier.to_string()))
    }

    /// Stage 4: partition the columns of `df` and remember the lists.
    pub fn identify_feature_types(&mut self, df: &DataFrame) -> &FeatureTypes {
        self.feature_types = DataProfiler::feature_types(df);
        info!("Numeric features: {:?}", self.feature_types.numeric);
        info!("Categorical features: {:?}", self.feature_types.categorical);
        &self.feature_types
    }

    /// Stage 5: fit the scaler on the numeric features and apply it in place.
    ///
    /// A no-op when there are no numeric features.
    pub fn standardize_numeric_features(&mut self, df: &mut DataFrame) -> Result<()> {
        if self.feature_types.numeric.is_empty() {
            debug!("No numeric features to standardize");
            return Ok(());
        }

        self.scaler.fit_transform(df, &self.feature_types.numeric)?;

        if self.config.emit_warnings {
            for (name, params) in self.scaler.fitted_columns() {
                if params.is_constant() {
                    warn!("Numeric feature '{}' has zero variance", name);
                }
            }
        }

        info!(
            "Standardized {} numeric features",
            self.feature_types.numeric.len()
        );
        Ok(())
    }

    /// Stage 6: sequential IQR filtering over the numeric features.
    pub fn remove_outliers(&self, df: &mut DataFrame) -> Result<Vec<OutlierPass>> {
        let original_shape = df.shape();
        let numeric = &self.feature_types.numeric;

        let passes = OutlierHandler::remove_outliers(
            df,
            numeric,
            self.config.iqr_multiplier,
            |idx, pass| {
                self.notify(ProgressUpdate::with_items(
                    PreprocessingStage::OutlierRemoval,
                    format!("Column: {}", pass.column),
                    idx + 1,
                    numeric.len(),
                    format!("Removed {} rows by '{}'", pass.rows_removed(), pass.column),
                ));
            },
        )?;

        let rows_removed = original_shape.0 - df.height();
        info!("Original shape: {:?}", original_shape);
        info!("Shape after outlier removal: {:?}", df.shape());
        info!("Rows removed: {}", rows_removed);

        if self.config.emit_warnings && original_shape.0 > 0 && df.height() == 0 {
            warn!("Outlier removal discarded every row");
        }

        Ok(passes)
    }

    /// Stage 7: fit one label encoder per categorical feature and apply it.
    pub fn encode_categorical_features(&mut self, df: &mut DataFrame) -> Result<()> {
        self.label_encoders.clear();
        let total = self.feature_types.categorical.len();

        for (idx, column) in self.feature_types.categorical.iter().enumerate() {
            let series = df
                .column(column)
                .map_err(|_| PreprocessingError::ColumnNotFound(column.clone()))?
                .as_materialized_series()
                .clone();

            let mut encoder = LabelEncoder::new(column.as_str());
            let encoded = encoder.fit_transform(&series)?;
            df.replace(column, encoded)?;

            info!(
                "Label encoding for column '{}' done ({} classes)",
                column,
                encoder.classes().len()
            );
            self.label_encoders.insert(column.clone(), encoder);

            self.notify(ProgressUpdate::with_items(
                PreprocessingStage::Encoding,
                format!("Column: {}", column),
                idx + 1,
                total,
                format!("Encoded '{}'", column),
            ));
        }

        Ok(())
    }

    /// Stage 8: write the dataset without an index column.
    pub fn save(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        write_csv(df, path, self.config.separator)
    }

    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Scaler fitted by the last standardization stage.
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Label encoders fitted by the last encoding stage, keyed by column.
    pub fn label_encoders(&self) -> &BTreeMap<String, LabelEncoder> {
        &self.label_encoders
    }

    pub fn label_encoder(&self, column: &str) -> Option<&LabelEncoder> {
        self.label_encoders.get(column)
    }

    pub fn numeric_features(&self) -> &[String] {
        &self.feature_types.numeric
    }

    pub fn categorical_features(&self) -> &[String] {
        &self.feature_types.categorical
    }

    fn notify(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for [`Preprocessor`].
#[derive(Default)]
pub struct PreprocessorBuilder {
    config: Option<PreprocessorConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PreprocessorBuilder: Send);

impl PreprocessorBuilder {
    /// Set the preprocessor configuration.
    pub fn config(mut self, config: PreprocessorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the preprocessor.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Preprocessor, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let mut preprocessor = Preprocessor::with_config(config);
        preprocessor.progress_reporter = self.progress_reporter;
        Ok(preprocessor)
    }
}
