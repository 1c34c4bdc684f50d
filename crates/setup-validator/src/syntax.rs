//! Script syntax checking.
//!
//! The validator only needs to know whether a script parses. That question
//! is answered by a [`SyntaxChecker`], so tests and other callers can swap
//! the interpreter-backed default for their own implementation.

use crate::error::{Result, ValidatorError};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Decides whether a script file parses.
pub trait SyntaxChecker: Send + Sync {
    /// Returns `Ok(())` when `path` parses.
    ///
    /// Fails with [`ValidatorError::Syntax`] on a parse error and with
    /// [`ValidatorError::Io`], [`ValidatorError::Interpreter`] or
    /// [`ValidatorError::Script`] when the check itself cannot run.
    fn check(&self, path: &Path) -> Result<()>;
}

// Compiles in memory so no bytecode cache is written next to the script.
const COMPILE_SNIPPET: &str =
    "import sys; compile(open(sys.argv[1], encoding='utf-8').read(), sys.argv[1], 'exec')";

// IndentationError and TabError are SyntaxError subclasses.
const SYNTAX_ERROR_NAMES: &[&str] = &["SyntaxError", "IndentationError", "TabError"];

/// Whether the final traceback line names a parse error.
fn is_syntax_error(message: &str) -> bool {
    SYNTAX_ERROR_NAMES
        .iter()
        .any(|name| message.strip_prefix(name).is_some_and(|rest| rest.starts_with(':')))
}

/// Checks Python syntax by asking an interpreter to compile the source.
#[derive(Debug, Clone)]
pub struct PythonCompileChecker {
    interpreter: String,
}

impl PythonCompileChecker {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for PythonCompileChecker {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl SyntaxChecker for PythonCompileChecker {
    fn check(&self, path: &Path) -> Result<()> {
        fs::metadata(path).map_err(|e| ValidatorError::io(path, e))?;

        debug!("Compiling {} with {}", path.display(), self.interpreter);
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(COMPILE_SNIPPET)
            .arg(path)
            .output()
            .map_err(|e| ValidatorError::Interpreter {
                interpreter: self.interpreter.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("compilation failed")
            .trim()
            .to_string();

        let path = path.to_path_buf();
        if is_syntax_error(&message) {
            Err(ValidatorError::Syntax { path, message })
        } else {
            debug!("{} failed without a syntax error: {}", self.interpreter, message);
            Err(ValidatorError::Script { path, message })
        }
    }
}
