//! Configuration for the setup validator.
//!
//! All paths are relative to [`ValidatorConfig::base_dir`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Preprocessing script checked by default.
pub const DEFAULT_SCRIPT_PATH: &str = "preprocessing/automate_farhanabdul12.py";

/// A file that must exist, with the label shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredFile {
    pub path: PathBuf,
    pub description: String,
}

impl RequiredFile {
    pub fn new(path: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

/// What the validator expects to find in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Directory every other path is resolved against.
    pub base_dir: PathBuf,

    pub required_files: Vec<RequiredFile>,

    /// Script whose syntax is checked.
    pub script_path: PathBuf,

    /// YAML files parsed when present.
    pub yaml_files: Vec<PathBuf>,

    /// Dependency manifest.
    pub requirements_file: PathBuf,

    /// Package that must appear at the start of a manifest line.
    pub required_package: String,

    /// Version substring expected on the package's line.
    pub expected_version: String,

    pub expected_dirs: Vec<PathBuf>,

    /// Interpreter used by the default syntax checker.
    pub interpreter: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            required_files: vec![
                RequiredFile::new("loanapproval_raw.csv", "Dataset mentah"),
                RequiredFile::new("requirements.txt", "Python dependencies"),
                RequiredFile::new("environment.yml", "Conda environment"),
                RequiredFile::new("README.md", "Dokumentasi utama"),
                RequiredFile::new(
                    ".github/workflows/preprocessing.yml",
                    "GitHub Actions workflow",
                ),
                RequiredFile::new(DEFAULT_SCRIPT_PATH, "Script preprocessing"),
            ],
            script_path: PathBuf::from(DEFAULT_SCRIPT_PATH),
            yaml_files: vec![
                PathBuf::from(".github/workflows/preprocessing.yml"),
                PathBuf::from("environment.yml"),
            ],
            requirements_file: PathBuf::from("requirements.txt"),
            required_package: "mlflow".to_string(),
            expected_version: "2.19.0".to_string(),
            expected_dirs: vec![
                PathBuf::from(".github"),
                PathBuf::from(".github/workflows"),
                PathBuf::from("preprocessing"),
            ],
            interpreter: "python3".to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Default expectations rooted at `base_dir`.
    pub fn for_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Resolve a configured relative path against the base directory.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.base_dir.join(relative)
    }
}
