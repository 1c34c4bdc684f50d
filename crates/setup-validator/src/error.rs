//! Error types for the setup validator.
//!
//! A failed check is not an error: every check still runs and reports a
//! failed line. These errors describe why a single check could not pass.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{message}")]
    Syntax { path: PathBuf, message: String },

    /// The interpreter ran but failed for a reason other than a parse error,
    /// such as source that is not valid UTF-8.
    #[error("{message}")]
    Script { path: PathBuf, message: String },

    #[error("interpreter '{interpreter}' unavailable: {reason}")]
    Interpreter { interpreter: String, reason: String },
}

impl ValidatorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised by the content being checked rather than by
    /// the environment (unreadable file, missing interpreter).
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::Yaml { .. } | Self::Syntax { .. })
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
