//! Error types for hamcode core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Bit index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for hamcode core operations
pub type Result<T> = std::result::Result<T, CoreError>;
