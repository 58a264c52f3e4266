//! Configuration file discovery and loading.
//!
//! Config lives next to the project:
//! 1. Project config (`.ensure-params.yml`)
//! 2. Local overrides (`.ensure-params.local.yml`), merged over the project config

use crate::config::merger::merge_configs;
use crate::config::schema::ParamsConfig;
use crate::error::{ParamsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file name.
pub const PROJECT_CONFIG: &str = ".ensure-params.yml";

/// Local override file name.
pub const LOCAL_CONFIG: &str = ".ensure-params.local.yml";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .ensure-params.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .ensure-params.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(PROJECT_CONFIG)),
            project_local: existing(project_root.join(LOCAL_CONFIG)),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    /// Check if a project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Load a single config file without merging.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ParamsConfig> {
    let content = read_config(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ParamsConfig> {
    if content.trim().is_empty() {
        return Ok(ParamsConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ParamsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    serde_yaml::from_str(&content).map_err(|e| ParamsError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_config(path: &Path) -> Result<String> {
    tracing::debug!("Loading config from {}", path.display());
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ParamsError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ParamsError::Io(e)
        }
    })
}

/// Load and merge the project config and its local overrides.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<ParamsConfig> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_project_config() {
        return Err(ParamsError::ConfigNotFound {
            path: project_root.join(PROJECT_CONFIG),
        });
    }

    let layers = paths
        .all_existing()
        .into_iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    serde_yaml::from_value(merge_configs(&layers)).map_err(|e| ParamsError::ConfigParseError {
        path: project_root.join(PROJECT_CONFIG),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges the project config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ParamsConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

/// Like [`load_config`], but falls back to defaults when the project has no config.
///
/// An explicit override must still exist.
pub fn load_config_or_default(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<ParamsConfig> {
    match load_config(project_root, config_override) {
        Err(ParamsError::ConfigNotFound { path }) if config_override.is_none() => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(ParamsConfig::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG), config).unwrap();
        temp
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = project("");
        fs::write(temp.path().join(LOCAL_CONFIG), "").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.has_project_config());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(!paths.has_project_config());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn load_config_file_returns_not_found_error() {
        let result = load_config_file(Path::new("/nonexistent/.ensure-params.yml"));
        assert!(matches!(result, Err(ParamsError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_returns_parse_error_for_invalid_yaml() {
        let result = parse_config("settings: [", Path::new("test.yml"));
        assert!(matches!(result, Err(ParamsError::ConfigParseError { .. })));
    }

    #[test]
    fn parse_config_handles_empty_content() {
        let config = parse_config("", Path::new("test.yml")).unwrap();
        assert!(config.requirements.is_empty());
    }

    #[test]
    fn merged_config_applies_local_overrides() {
        let temp = project(
            r#"
settings:
  default_format: json
requirements:
  create_pet: [pet]
  update_pet: [id]
"#,
        );
        fs::write(
            temp.path().join(LOCAL_CONFIG),
            r#"
settings:
  max_depth: 5
requirements:
  update_pet: null
"#,
        )
        .unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.settings.max_depth, 5);
        assert_eq!(config.settings.default_format, OutputFormat::Json);
        assert!(config.requirements.contains_key("create_pet"));
        assert!(!config.requirements.contains_key("update_pet"));
    }

    #[test]
    fn merged_config_tolerates_empty_local_file() {
        let temp = project("requirements:\n  create_pet: [pet]\n");
        fs::write(temp.path().join(LOCAL_CONFIG), "").unwrap();

        let config = load_merged_config(temp.path()).unwrap();
        assert!(config.requirements.contains_key("create_pet"));
    }

    #[test]
    fn merged_config_requires_project_file() {
        let temp = TempDir::new().unwrap();
        let result = load_merged_config(temp.path());
        assert!(matches!(result, Err(ParamsError::ConfigNotFound { .. })));
    }

    #[test]
    fn override_skips_discovery() {
        let temp = project("requirements:\n  from_project: [a]\n");
        let custom = temp.path().join("custom.yml");
        fs::write(&custom, "requirements:\n  from_custom: [b]\n").unwrap();

        let config = load_config(temp.path(), Some(&custom)).unwrap();
        assert!(config.requirements.contains_key("from_custom"));
        assert!(!config.requirements.contains_key("from_project"));
    }

    #[test]
    fn or_default_falls_back_without_project_config() {
        let temp = TempDir::new().unwrap();
        let config = load_config_or_default(temp.path(), None).unwrap();
        assert!(config.requirements.is_empty());

        let missing = temp.path().join("missing.yml");
        assert!(load_config_or_default(temp.path(), Some(&missing)).is_err());
    }
}
