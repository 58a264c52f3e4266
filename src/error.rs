//! Error types for ensure-params operations.
//!
//! This module defines [`ParamsError`], the error type used by the config
//! loader and the CLI, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The checker itself returns [`EnsureError`]; it is wrapped here only when
//!   a check runs as part of a larger operation
//! - Use `ParamsError` for failures that need distinct handling
//! - Use `anyhow::Error` (via `ParamsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::params::TreeError;
use crate::requirements::EnsureError;

/// Core error type for ensure-params operations.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to parse a parameters payload.
    #[error("Failed to parse parameters from {source_name}: {message}")]
    ParamsParseError { source_name: String, message: String },

    /// A named requirement set is not defined in the configuration.
    #[error("Unknown requirement set: {name}")]
    UnknownRequirementSet { name: String },

    /// A requirement check did not pass.
    #[error(transparent)]
    Ensure(#[from] EnsureError),

    /// A parameter payload could not be turned into a tree.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ensure-params operations.
pub type Result<T> = std::result::Result<T, ParamsError>;
