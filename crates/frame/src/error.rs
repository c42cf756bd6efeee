//! Error types for hamcode frame

use thiserror::Error;

/// Frame processing error types
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Word size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Invalid FEC parameters: {msg}")]
    InvalidFecParameters { msg: String },

    #[error("Core error: {0}")]
    Core(#[from] hamcode_core::CoreError),
}

/// Result type for hamcode frame operations
pub type Result<T> = std::result::Result<T, FrameError>;
