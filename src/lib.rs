pub mod comment_cmd;
pub mod parse;
pub mod report;
pub mod tool;

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub use parse::{BenchmarkResult, ParsedLine, parse_lines, parse_results};
pub use report::{Icon, Overall, Verdict, classify};
pub use tool::{Benchstat, ComparisonTool, MockTool};

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("failed to run {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status}:\n{output}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        output: String,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

pub type CommentResult<T> = Result<T, CommentError>;

/// Write `contents` to `path`, creating missing parent directories first.
pub fn write_file(path: &std::path::Path, contents: &str) -> CommentResult<()> {
    let to_err = |source| CommentError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(to_err)?;
        }
    }
    std::fs::write(path, contents).map_err(to_err)
}
