//! Required-parameter specs and the checker that enforces them.
//!
//! # Modules
//!
//! - [`spec`] - Requirement specs, their builder and literal parser
//! - [`checker`] - The depth-first presence checker
//! - [`missing`] - Missing-path and error types produced by a check

pub mod checker;
pub mod missing;
pub mod spec;

pub use checker::{ensure, Ensure, RequirementChecker};
pub use missing::{EnsureError, MissingPath};
pub use spec::{Requirement, RequirementSpec, DEFAULT_MAX_DEPTH};
