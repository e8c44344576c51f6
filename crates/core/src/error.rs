//! Error types for the metadata layer
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy separates four classes a caller may want to treat
//! differently:
//! - validation errors (bad tag names, duplicates, missing tags) rejected
//!   before any I/O side effect
//! - I/O failures, fatal for the operation in progress
//! - serialization failures on the persisted snapshot content
//! - internal invariant violations, which indicate a bug rather than a
//!   recoverable condition

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for metadata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the metadata layer
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Tag name failed validation
    #[error("Tag name '{name}' is {reason}")]
    InvalidTagName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Tag already exists
    #[error("Tag name '{0}' already exists")]
    TagExists(String),

    /// Tag not found
    #[error("Tag '{0}' doesn't exist")]
    TagNotFound(String),

    /// A tag file write failed; the write may or may not have landed,
    /// so no cleanup is attempted
    #[error("Exception occurs when committing tag '{name}' (path {path}). Cannot clean up because we can't determine the success: {source}")]
    TagCommit {
        /// Tag being committed
        name: String,
        /// Destination tag file path
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// Internal invariant violated; callers should treat this as fatal
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
