//! `benchstat` subprocess invocation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::{CommentError, CommentResult};

use super::traits::ComparisonTool;

/// Configuration for the benchstat tool.
#[derive(Debug, Clone)]
pub struct BenchstatConfig {
    /// Path to the benchstat binary
    pub path: PathBuf,
    /// Extra arguments placed before the two result files
    pub extra_args: Vec<String>,
}

impl Default for BenchstatConfig {
    fn default() -> Self {
        BenchstatConfig {
            path: PathBuf::from("benchstat"),
            extra_args: Vec::new(),
        }
    }
}

impl BenchstatConfig {
    /// Create a new config with the given binary path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BenchstatConfig {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add extra arguments.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

/// Runs the benchstat executable and captures what it prints.
pub struct Benchstat {
    config: BenchstatConfig,
}

impl Benchstat {
    pub fn new(config: BenchstatConfig) -> Self {
        Benchstat { config }
    }

    /// Create a tool with just the binary path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(BenchstatConfig::new(path))
    }

    fn command(&self, baseline: &Path, candidate: &Path) -> Command {
        let mut cmd = Command::new(&self.config.path);
        cmd.args(&self.config.extra_args)
            .arg(baseline)
            .arg(candidate)
            .stdin(Stdio::null());
        cmd
    }
}

impl Default for Benchstat {
    fn default() -> Self {
        Self::new(BenchstatConfig::default())
    }
}

impl ComparisonTool for Benchstat {
    fn name(&self) -> &str {
        "benchstat"
    }

    fn compare(&self, baseline: &Path, candidate: &Path) -> CommentResult<String> {
        let tool = self.config.path.display().to_string();
        info!(
            tool = %tool,
            baseline = %baseline.display(),
            candidate = %candidate.display(),
            "running comparison"
        );

        let spawn_err = |source| CommentError::ToolSpawn {
            tool: tool.clone(),
            source,
        };

        // One pipe behind both stdout and stderr, as with `2>&1`
        let (mut reader, writer) = std::io::pipe().map_err(spawn_err)?;
        let mut child = {
            let mut cmd = self.command(baseline, candidate);
            cmd.stdout(writer.try_clone().map_err(spawn_err)?).stderr(writer);
            // `cmd` holds the write ends; it must drop before reading to EOF
            cmd.spawn().map_err(spawn_err)?
        };

        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        let status = child.wait().map_err(spawn_err)?;
        read.map_err(spawn_err)?;

        let text = String::from_utf8_lossy(&bytes).into_owned();
        debug!(status = %status, bytes = text.len(), "comparison finished");

        if !status.success() {
            return Err(CommentError::ToolFailed {
                tool,
                status,
                output: text,
            });
        }
        Ok(text)
    }
}
