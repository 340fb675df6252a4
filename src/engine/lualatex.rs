//! LuaLaTeX subprocess engine.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

use super::{EngineOptions, TypesetEngine};

/// Console output of the engine, captured inside the output directory.
const CONSOLE_LOG: &str = "engine-console.log";

/// Lines of diagnostics kept for error messages.
const DIAGNOSTIC_LINES: usize = 40;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `lualatex` (or a compatible program) as a child process.
#[derive(Debug, Clone, Default)]
pub struct LuaLatex {
    options: EngineOptions,
}

impl LuaLatex {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// The options this engine runs with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    fn command(&self, source: &Path, out_dir: &Path, console: File) -> Result<Command> {
        let console_err = console.try_clone()?;
        let mut cmd = Command::new(&self.options.program);
        cmd.args(&self.options.extra_args)
            .arg("--interaction=nonstopmode")
            .arg("--halt-on-error")
            .arg(format!("--output-directory={}", out_dir.display()))
            .arg(source)
            .current_dir(out_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(console))
            .stderr(Stdio::from(console_err));
        Ok(cmd)
    }
}

impl TypesetEngine for LuaLatex {
    fn name(&self) -> &str {
        &self.options.program
    }

    fn typeset(&self, source: &Path, out_dir: &Path) -> Result<PathBuf> {
        let console_path = out_dir.join(CONSOLE_LOG);
        let console = File::create(&console_path)?;
        let mut cmd = self.command(source, out_dir, console)?;

        log::info!("running {} on {}", self.options.program, source.display());
        let started = Instant::now();
        let mut child = cmd.spawn().map_err(|e| Error::EngineSpawn {
            program: self.options.program.clone(),
            source: e,
        })?;

        let status = wait_with_timeout(&mut child, self.options.timeout)?;
        log::info!(
            "{} finished with {} after {:?}",
            self.options.program,
            status,
            started.elapsed()
        );

        if !status.success() {
            return Err(Error::EngineFailed {
                status: status.to_string(),
                diagnostics: diagnostics(&console_path, &artifact_path(source, out_dir, "log")),
            });
        }

        let pdf = artifact_path(source, out_dir, "pdf");
        if !pdf.is_file() {
            return Err(Error::MissingOutput(pdf));
        }
        Ok(pdf)
    }
}

/// Where the engine writes its `ext` artifact for `source`.
fn artifact_path(source: &Path, out_dir: &Path, ext: &str) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    out_dir.join(stem).with_extension(ext)
}

fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus> {
    let Some(timeout) = timeout else {
        return Ok(child.wait()?);
    };

    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if started.elapsed() >= timeout {
            // The child may exit between try_wait and kill
            if let Err(e) = child.kill() {
                log::warn!("failed to kill engine process: {}", e);
            }
            let _ = child.wait();
            return Err(Error::EngineTimeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Tail of the console output, falling back to the engine's log file.
fn diagnostics(console: &Path, log_file: &Path) -> String {
    for path in [console, log_file] {
        match fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => return tail(&String::from_utf8_lossy(&bytes)),
            Ok(_) => {}
            Err(e) => log::warn!("cannot read engine output {}: {}", path.display(), e),
        }
    }
    "no diagnostic output available".to_string()
}

fn tail(text: &str) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let start = lines.len().saturating_sub(DIAGNOSTIC_LINES);
    lines[start..].join("\n")
}
