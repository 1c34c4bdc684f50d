//! Individual setup checks.
//!
//! Each check inspects the repository and returns a [`CheckOutcome`]. A
//! check never aborts the others; problems become failed lines.

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidatorError};
use crate::report::{CheckKind, CheckLine, CheckOutcome};
use crate::syntax::SyntaxChecker;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Every required file must exist.
pub fn check_required_files(config: &ValidatorConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::new(CheckKind::RequiredFiles);

    for file in &config.required_files {
        let line = if config.resolve(&file.path).exists() {
            CheckLine::pass(format!("{}: {}", file.description, file.path.display()))
        } else {
            CheckLine::fail(format!(
                "{}: {} - FILE NOT FOUND!",
                file.description,
                file.path.display()
            ))
        };
        outcome.push(line);
    }

    outcome
}

/// The configured script must parse.
pub fn check_script(config: &ValidatorConfig, checker: &dyn SyntaxChecker) -> CheckOutcome {
    let mut outcome = CheckOutcome::new(CheckKind::PythonScript);
    let display = config.script_path.display();

    let line = match checker.check(&config.resolve(&config.script_path)) {
        Ok(()) => CheckLine::pass(format!("Python script syntax valid: {}", display)),
        Err(e) if e.is_content_error() => {
            CheckLine::fail(format!("Python script syntax error in {}: {}", display, e))
        }
        Err(e) => CheckLine::fail(format!("Error checking {}: {}", display, e)),
    };
    outcome.push(line);
    outcome
}

/// Every YAML file that exists must parse. Absent files are skipped.
pub fn check_yaml_files(config: &ValidatorConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::new(CheckKind::YamlFiles);

    for relative in &config.yaml_files {
        let path = config.resolve(relative);
        if !path.exists() {
            debug!("Skipping absent YAML file {}", relative.display());
            continue;
        }

        let line = match parse_yaml(&path) {
            Ok(()) => CheckLine::pass(format!("YAML syntax valid: {}", relative.display())),
            Err(e) if e.is_content_error() => CheckLine::fail(format!(
                "YAML syntax error in {}: {}",
                relative.display(),
                e
            )),
            Err(e) => CheckLine::fail(format!("Error checking {}: {}", relative.display(), e)),
        };
        outcome.push(line);
    }

    outcome
}

fn parse_yaml(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| ValidatorError::io(path, e))?;
    serde_yaml::from_str::<serde_yaml::Value>(&content).map_err(|source| {
        ValidatorError::Yaml {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(())
}

/// How the required package appears in the dependency manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementStatus {
    /// Found with the expected version on its line.
    Pinned,
    /// Found, but its line does not mention the expected version.
    OtherVersion(String),
    Missing,
}

/// Look for the first manifest line starting with `package`.
pub fn find_requirement(content: &str, package: &str, version: &str) -> RequirementStatus {
    match content
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(package))
    {
        Some(line) if line.contains(version) => RequirementStatus::Pinned,
        Some(line) => RequirementStatus::OtherVersion(line.to_string()),
        None => RequirementStatus::Missing,
    }
}

/// The manifest must list the required package. A different version only
/// warns.
pub fn check_requirements(config: &ValidatorConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::new(CheckKind::Requirements);
    let manifest = config.requirements_file.display();
    let path = config.resolve(&config.requirements_file);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            let err = ValidatorError::io(&path, e);
            outcome.push(CheckLine::fail(format!("Error checking {}: {}", manifest, err)));
            return outcome;
        }
    };

    let package = &config.required_package;
    let version = &config.expected_version;
    match find_requirement(&content, package, version) {
        RequirementStatus::Pinned => {
            outcome.push(CheckLine::pass(format!(
                "{} {} found in {}",
                package, version, manifest
            )));
        }
        RequirementStatus::OtherVersion(line) => {
            debug!("Requirement line for {}: {}", package, line);
            outcome.push(CheckLine::warn(format!(
                "{} version might not be {}",
                package, version
            )));
        }
        RequirementStatus::Missing => {
            outcome.push(CheckLine::fail(format!(
                "{} not found in {}",
                package, manifest
            )));
            return outcome;
        }
    }

    outcome.push(CheckLine::pass(format!("{} format valid", manifest)));
    outcome
}

/// Every expected directory must exist and be a directory.
pub fn check_directories(config: &ValidatorConfig) -> CheckOutcome {
    let mut outcome = CheckOutcome::new(CheckKind::DirectoryStructure);

    for dir in &config.expected_dirs {
        let line = if config.resolve(dir).is_dir() {
            CheckLine::pass(format!("Directory exists: {}", dir.display()))
        } else {
            CheckLine::fail(format!("Directory missing: {}", dir.display()))
        };
        outcome.push(line);
    }

    outcome
}
