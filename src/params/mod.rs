//! Request parameter trees and the adapters that build them.
//!
//! The checker only ever reads a [`ParameterTree`]. This module turns the
//! payloads a request layer typically holds into one:
//!
//! - JSON values via `From<serde_json::Value>`
//! - YAML values via `TryFrom<serde_yaml::Value>` (scalar keys become strings)
//! - Query strings and form bodies via [`parse_query`]
//! - Files of any of the above via [`load_params_file`]
//!
//! # Example
//!
//! ```
//! use ensure_params::params::parse_query;
//!
//! let tree = parse_query("pet[owner][name]=Suess").unwrap();
//! assert!(tree.has_path(&["pet", "owner", "name"]));
//! ```

pub mod query;
pub mod source;
pub mod tree;

pub use query::{parse_query, parse_query_with_limit};
pub use source::{load_params_file, parse_payload, PayloadFormat};
pub use tree::{ParameterTree, Scalar};

use thiserror::Error;

/// Errors raised while building a parameter tree from a raw payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The same key was used as a scalar and as a container.
    #[error("Conflicting structure for parameter '{key}'")]
    TypeConflict { key: String },

    /// A key nests deeper than the configured limit.
    #[error("Parameter nesting exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// A mapping key could not be reduced to a string.
    #[error("Unsupported parameter key: {key}")]
    UnsupportedKey { key: String },
}
