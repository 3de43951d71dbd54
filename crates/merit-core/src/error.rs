//! Unified error types for production planning
//!
//! [`MeritError`] separates the three outcomes a caller must tell apart:
//! bad input ([`MeritError::Validation`]), a load no plant combination can
//! serve ([`MeritError::Infeasible`]), and a search that ran past its bounds
//! ([`MeritError::Timeout`]). All three are terminal for the request.
//!
//! # Example
//!
//! ```ignore
//! use merit_core::{MeritError, MeritResult};
//!
//! fn plan(path: &str) -> MeritResult<()> {
//!     let request = LoadRequest::from_path(path)?;
//!     plan_production(&request, &DispatchConfig::default())?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all merit operations.
#[derive(Error, Debug)]
pub enum MeritError {
    /// Malformed or out-of-range input, with the offending field
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// No combination of plants can serve the requested load
    #[error("Dispatch infeasible: {0}")]
    Infeasible(String),

    /// The transition search exceeded its depth or time bound
    #[error("Dispatch timeout: {0}")]
    Timeout(String),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Coarse classification used by process boundaries (exit codes, manifests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Infeasible,
    Timeout,
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "invalid",
            ErrorKind::Infeasible => "infeasible",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Other => "error",
        }
    }
}

impl MeritError {
    /// Build a validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MeritError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MeritError::Validation { .. } | MeritError::Parse(_) => ErrorKind::Validation,
            MeritError::Infeasible(_) => ErrorKind::Infeasible,
            MeritError::Timeout(_) => ErrorKind::Timeout,
            MeritError::Io(_) | MeritError::Other(_) => ErrorKind::Other,
        }
    }
}

/// Convenience type alias for Results using MeritError.
pub type MeritResult<T> = Result<T, MeritError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for MeritError {
    fn from(err: anyhow::Error) -> Self {
        MeritError::Other(err.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for MeritError {
    fn from(err: serde_json::Error) -> Self {
        MeritError::Parse(err.to_string())
    }
}
