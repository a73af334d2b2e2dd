// Error types for state installation, state loading, and config loading.
//
// Only two things can go wrong with the generator itself: a caller asks for a
// state buffer too small to hold any table, or a raw word buffer handed in
// from outside carries a header that does not describe a usable state.
// Seeding, swapping, and drawing are total and never produce errors.
//
// Every fallible operation checks its inputs before touching the generator,
// so an `Err` always means the generator is exactly as it was.

use thiserror::Error;

/// Result type used by state operations.
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors produced while installing or loading a state buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `install_state` was asked for fewer than 8 bytes.
    #[error("state size too small: {byte_size} bytes (minimum 8)")]
    SizeTooSmall { byte_size: usize },

    /// The supplied buffer is smaller than the table its size selects.
    #[error("state buffer too short: {available} bytes available, table needs {required}")]
    BufferTooShort { required: usize, available: usize },

    /// The header word names an unsupported table size or out-of-range cursors.
    #[error("invalid state header: {header:#010x}")]
    InvalidHeader { header: u32 },

    /// The word buffer is shorter than its header says it must be.
    #[error("truncated state buffer: {words} words, header requires {required}")]
    Truncated { required: usize, words: usize },
}

/// Errors produced while loading a `DrawConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}
