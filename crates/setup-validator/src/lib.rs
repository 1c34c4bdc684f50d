//! Setup Validator
//!
//! Checks that a preprocessing repository has everything its CI workflow
//! needs before it is pushed:
//!
//! - **Required Files**: dataset, dependency manifests, documentation, workflow and script
//! - **Python Script**: the preprocessing script parses
//! - **YAML Files**: workflow and conda environment parse when present
//! - **Requirements**: the manifest lists `mlflow`, ideally at `2.19.0`
//! - **Directory Structure**: `.github`, `.github/workflows` and `preprocessing` exist
//!
//! Checks are read-only and never stop each other; the [`ValidationReport`]
//! collects every line and decides the exit code.

pub mod checks;
pub mod config;
pub mod error;
pub mod report;
pub mod syntax;
mod validator;

pub use config::{RequiredFile, ValidatorConfig};
pub use error::{Result as ValidatorResult, ValidatorError};
pub use report::{CheckKind, CheckLine, CheckOutcome, CheckStatus, ValidationReport};
pub use syntax::{PythonCompileChecker, SyntaxChecker};
pub use validator::SetupValidator;
