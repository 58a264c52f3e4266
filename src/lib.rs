//! ensure-params - Check that request parameters carry every required key.
//!
//! A requirement spec names keys that must be present in a parameter tree,
//! recursing into nested mappings. The first absent key is reported with its
//! full path, as in `Required parameter missing: pet => owner => name`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Named requirement sets and settings loaded from YAML
//! - [`error`] - Error types and result aliases
//! - [`params`] - Parameter trees and payload adapters
//! - [`requirements`] - Requirement specs and the presence checker
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use ensure_params::params::ParameterTree;
//! use ensure_params::requirements::{Ensure, RequirementSpec};
//! use serde_json::json;
//!
//! let params = ParameterTree::from(json!({
//!     "pet": { "name": "Lucky", "owner": { "name": "Marge" } }
//! }));
//!
//! let spec = RequirementSpec::from_value(&json!([{ "pet": ["name", { "owner": "name" }] }]))
//!     .unwrap();
//! assert!(params.ensure(&spec).is_ok());
//!
//! let spec = RequirementSpec::new().nested_key("pet", "breed");
//! let err = params.ensure(&spec).unwrap_err();
//! assert_eq!(err.to_string(), "Required parameter missing: pet => breed");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod params;
pub mod requirements;
pub mod ui;

pub use error::{ParamsError, Result};
