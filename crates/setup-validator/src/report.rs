//! Check results and the rendered report.

use std::fmt;
use std::path::PathBuf;

/// Status of a single report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Worth a look, but does not fail the group.
    Warn,
}

impl CheckStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Pass => "✅",
            Self::Fail => "❌",
            Self::Warn => "⚠️ ",
        }
    }
}

/// One line of check output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckLine {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warn,
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.symbol(), self.message)
    }
}

/// The check groups, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    RequiredFiles,
    PythonScript,
    YamlFiles,
    Requirements,
    DirectoryStructure,
}

impl CheckKind {
    /// Name used in the summary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequiredFiles => "Required Files",
            Self::PythonScript => "Python Script",
            Self::YamlFiles => "YAML Files",
            Self::Requirements => "Requirements",
            Self::DirectoryStructure => "Directory Structure",
        }
    }

    /// Section heading printed above the group's lines.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::RequiredFiles => "📋 Checking Required Files:",
            Self::PythonScript => "🐍 Checking Python Script:",
            Self::YamlFiles => "📄 Checking YAML Files:",
            Self::Requirements => "📦 Checking Requirements:",
            Self::DirectoryStructure => "📂 Checking Directory Structure:",
        }
    }
}

/// Outcome of one check group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub lines: Vec<CheckLine>,
}

impl CheckOutcome {
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: CheckLine) {
        self.lines.push(line);
    }

    /// A group passes when none of its lines failed.
    pub fn passed(&self) -> bool {
        self.lines.iter().all(|l| l.status != CheckStatus::Fail)
    }

    /// Lines with the given status.
    pub fn lines_with(&self, status: CheckStatus) -> impl Iterator<Item = &CheckLine> {
        self.lines.iter().filter(move |l| l.status == status)
    }
}

/// Full validation report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub base_dir: PathBuf,
    pub outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    /// Process exit code: 0 when every group passed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }

    pub fn outcome(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔍 Validating GitHub Actions Setup")?;
        writeln!(f, "{}", "=".repeat(70))?;
        writeln!(f, "📁 Base directory: {}", self.base_dir.display())?;
        writeln!(f)?;

        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome.kind.heading())?;
            for line in &outcome.lines {
                writeln!(f, "{}", line)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "🎯 Validation Summary:")?;
        writeln!(f, "{}", "=".repeat(30))?;
        for outcome in &self.outcomes {
            let status = if outcome.passed() {
                "✅ PASS"
            } else {
                "❌ FAIL"
            };
            writeln!(f, "{}: {}", outcome.kind.name(), status)?;
        }
        writeln!(f)?;

        if self.all_passed() {
            writeln!(f, "🎉 ALL CHECKS PASSED!")?;
            writeln!(f, "✨ Repository is ready for GitHub Actions!")?;
            writeln!(f)?;
            writeln!(f, "Next Steps:")?;
            writeln!(f, "1. git add .")?;
            writeln!(f, "2. git commit -m 'Initial setup for automated preprocessing'")?;
            writeln!(f, "3. git push origin main")?;
            write!(f, "4. Check the GitHub Actions tab for the workflow run")
        } else {
            writeln!(f, "🚨 SOME CHECKS FAILED!")?;
            write!(f, "❌ Fix the errors above before pushing to GitHub")
        }
    }
}
