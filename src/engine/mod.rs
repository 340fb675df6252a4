//! Typesetting engine abstraction.
//!
//! The engine is an opaque external program: it receives a LaTeX source
//! file and an output directory and either produces a PDF there or fails.
//! [`TypesetEngine`] isolates that collaborator so the splicing pipeline
//! can run against any implementation.

mod lualatex;

pub use lualatex::LuaLatex;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// Default limit for a single engine run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Abstract interface for a typesetting engine.
pub trait TypesetEngine {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Typeset `source`, writing all artifacts into `out_dir`.
    ///
    /// Returns the path of the generated PDF.
    fn typeset(&self, source: &Path, out_dir: &Path) -> Result<PathBuf>;
}

/// Options for running an external engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Program name or path
    pub program: String,

    /// Arguments passed before the standard ones
    pub extra_args: Vec<String>,

    /// Kill the engine after this long (`None` = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl EngineOptions {
    /// Create new engine options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program to execute.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Append an argument passed before the standard ones.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Wait for the engine without a time limit.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            program: "lualatex".to_string(),
            extra_args: Vec::new(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}
