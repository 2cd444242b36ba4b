//! External syntax checkers and the per-run capability set.

use crate::config::Config;
use crate::error::{Result, WfcheckError};
use crate::process::{probe, run_tool};
use std::time::Duration;
use tracing::debug;

/// Compiles stdin as a standalone program and prints
/// `<msg> (line L, col C)` on a syntax error.
const PYTHON_COMPILE_PROGRAM: &str = r#"import sys
source = sys.stdin.read()
try:
    compile(source, "<python-c>", "exec")
except SyntaxError as exc:
    print(f"{exc.msg} (line {exc.lineno}, col {exc.offset})")
    sys.exit(1)
"#;

/// Outcome of checking one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    /// The checker rejected the source; carries its error text.
    Rejected(String),
}

/// A syntax checker fed source text on stdin.
pub trait SyntaxTool {
    /// Name used in diagnostics and warnings.
    fn name(&self) -> &str;

    /// Check `source`. `Err` means the checker itself could not run.
    fn check(&self, source: &str) -> Result<Verdict>;
}

/// A syntax checker backed by an external process.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessTool {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// `<shell> -n`: parse without executing.
    pub fn shell(program: &str, timeout: Duration) -> Self {
        Self::new(program, vec!["-n".to_string()], timeout)
    }

    /// `<python> -c <compile program>`.
    pub fn python(program: &str, timeout: Duration) -> Self {
        Self::new(
            program,
            vec!["-c".to_string(), PYTHON_COMPILE_PROGRAM.to_string()],
            timeout,
        )
    }

    /// Keep the tool only if `<program> --version` succeeds.
    pub fn probed(self) -> Option<Self> {
        if probe(&self.program, &[], self.timeout) {
            Some(self)
        } else {
            None
        }
    }
}

impl SyntaxTool for ProcessTool {
    fn name(&self) -> &str {
        &self.program
    }

    fn check(&self, source: &str) -> Result<Verdict> {
        let output = run_tool(&self.program, &self.args, Some(source), self.timeout)?;

        if output.timed_out {
            return Err(WfcheckError::Io(format!(
                "{} timed out after {}s",
                self.program,
                self.timeout.as_secs()
            )));
        }
        if output.is_success() {
            Ok(Verdict::Clean)
        } else {
            Ok(Verdict::Rejected(output.detail().to_string()))
        }
    }
}

/// Checkers available for this run, probed once.
///
/// Built by the driver and passed down; an absent checker means its check
/// is skipped for every block.
pub struct Toolchain {
    shell: Option<Box<dyn SyntaxTool>>,
    python: Option<Box<dyn SyntaxTool>>,
    warnings: Vec<String>,
}

impl Toolchain {
    /// Probe the configured shell and snippet compiler.
    pub fn detect(config: &Config) -> Self {
        let timeout = config.check_timeout();
        let mut warnings = Vec::new();

        let shell = ProcessTool::shell(&config.shell_program, timeout).probed();
        if shell.is_none() {
            warnings.push(format!(
                "{} is unavailable; skipping bash syntax checks.",
                config.shell_program
            ));
        }

        let python = ProcessTool::python(&config.python_program, timeout).probed();
        if python.is_none() {
            warnings.push(format!(
                "{} is unavailable; skipping python -c snippet checks.",
                config.python_program
            ));
        }

        debug!(
            shell = shell.is_some(),
            python = python.is_some(),
            "probed external checkers"
        );

        Self {
            shell: shell.map(|t| Box::new(t) as Box<dyn SyntaxTool>),
            python: python.map(|t| Box::new(t) as Box<dyn SyntaxTool>),
            warnings,
        }
    }

    /// Assemble a toolchain from explicit checkers.
    pub fn with_tools(
        shell: Option<Box<dyn SyntaxTool>>,
        python: Option<Box<dyn SyntaxTool>>,
    ) -> Self {
        Self {
            shell,
            python,
            warnings: Vec::new(),
        }
    }

    /// No external checkers at all.
    pub fn none() -> Self {
        Self::with_tools(None, None)
    }

    pub fn shell(&self) -> Option<&dyn SyntaxTool> {
        self.shell.as_deref()
    }

    pub fn python(&self) -> Option<&dyn SyntaxTool> {
        self.python.as_deref()
    }

    /// One message per checker that was unavailable at probe time.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
