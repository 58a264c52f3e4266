//! Configuration loading for ensure-params.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use ensure_params::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(".ensure-params.yml"),
//!     "requirements:\n  create_pet:\n    - pet: [name]\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! let spec = config.requirement_set("create_pet").unwrap();
//! assert_eq!(spec.to_string(), "pet => name");
//! ```

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    load_config, load_config_file, load_config_or_default, load_config_value, load_merged_config,
    parse_config, ConfigPaths, LOCAL_CONFIG, PROJECT_CONFIG,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{OutputFormat, ParamsConfig, Settings};
