use crate::checks::{
    check_directories, check_required_files, check_requirements, check_script, check_yaml_files,
};
use crate::config::ValidatorConfig;
use crate::report::ValidationReport;
use crate::syntax::{PythonCompileChecker, SyntaxChecker};
use tracing::{debug, info};

/// Runs every setup check against one repository.
///
/// # Example
///
/// ```rust,ignore
/// use setup_validator::{SetupValidator, ValidatorConfig};
///
/// let report = SetupValidator::new(ValidatorConfig::for_base_dir(".")).run();
/// println!("{}", report);
/// std::process::exit(report.exit_code().into());
/// ```
pub struct SetupValidator {
    config: ValidatorConfig,
    syntax_checker: Box<dyn SyntaxChecker>,
}

static_assertions::assert_impl_all!(SetupValidator: Send, Sync);

impl SetupValidator {
    /// Create a validator that checks scripts with the configured interpreter.
    pub fn new(config: ValidatorConfig) -> Self {
        let checker = PythonCompileChecker::new(config.interpreter.clone());
        Self {
            config,
            syntax_checker: Box::new(checker),
        }
    }

    /// Replace the script syntax checker.
    pub fn with_syntax_checker(mut self, checker: impl SyntaxChecker + 'static) -> Self {
        self.syntax_checker = Box::new(checker);
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run all checks in order. Every check runs regardless of earlier
    /// failures.
    pub fn run(&self) -> ValidationReport {
        info!("Validating setup in {}", self.config.base_dir.display());

        let outcomes = vec![
            check_required_files(&self.config),
            check_script(&self.config, self.syntax_checker.as_ref()),
            check_yaml_files(&self.config),
            check_requirements(&self.config),
            check_directories(&self.config),
        ];

        for outcome in &outcomes {
            debug!(
                "{}: {}",
                outcome.kind.name(),
                if outcome.passed() { "pass" } else { "fail" }
            );
        }

        ValidationReport {
            base_dir: self.config.base_dir.clone(),
            outcomes,
        }
    }
}
