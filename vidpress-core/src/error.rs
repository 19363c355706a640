use std::path::PathBuf;
use thiserror::Error;

/// Error types for vidpress-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern '{0}': {1}")]
    InvalidPattern(String, #[source] glob::PatternError),

    #[error("No valid input video files found")]
    NoFilesFound,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Encoder '{0}' is not available in this ffmpeg build")]
    EncoderUnavailable(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Command '{0}' exited with status {1}")]
    CommandFailed(String, i32),

    #[error("Encoder reported success but produced no output: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Failed to write report '{}': {}", .0.display(), .1)]
    ReportWrite(PathBuf, #[source] std::io::Error),
}

/// Result type for vidpress-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
