//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to
//! `.ensure-params.yml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ParamsError, Result};
use crate::requirements::{EnsureError, RequirementChecker, RequirementSpec, DEFAULT_MAX_DEPTH};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Global settings
    pub settings: Settings,

    /// Named requirement sets, kept as raw literals until compiled
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub requirements: BTreeMap<String, serde_json::Value>,
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Nesting limit for requirement specs and query-string keys
    pub max_depth: usize,

    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            default_format: OutputFormat::Human,
        }
    }
}

/// How check results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Styled terminal lines.
    #[default]
    Human,
    /// A JSON document on stdout.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl ParamsConfig {
    /// A checker honoring the configured depth limit.
    pub fn checker(&self) -> RequirementChecker {
        RequirementChecker::with_max_depth(self.settings.max_depth)
    }

    /// Compile a named requirement set.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRequirementSet` if `name` is not defined, or the
    /// spec error if its literal is malformed.
    pub fn requirement_set(&self, name: &str) -> Result<RequirementSpec> {
        let raw = self
            .requirements
            .get(name)
            .ok_or_else(|| ParamsError::UnknownRequirementSet {
                name: name.to_string(),
            })?;
        Ok(RequirementSpec::from_value_with_limit(
            raw,
            self.settings.max_depth,
        )?)
    }

    /// Compile every named requirement set, keeping failures per set.
    pub fn compile_all(&self) -> Vec<(&str, std::result::Result<RequirementSpec, EnsureError>)> {
        self.requirements
            .iter()
            .map(|(name, raw)| {
                (
                    name.as_str(),
                    RequirementSpec::from_value_with_limit(raw, self.settings.max_depth),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ParamsConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn defaults_apply_to_missing_settings() {
        let config = parse("requirements: {}");
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.settings.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.settings.default_format, OutputFormat::Human);
    }

    #[test]
    fn parses_settings() {
        let config = parse(
            r#"
settings:
  max_depth: 8
  default_format: json
"#,
        );
        assert_eq!(config.settings.max_depth, 8);
        assert_eq!(config.settings.default_format, OutputFormat::Json);
        assert_eq!(config.checker().max_depth(), 8);
    }

    #[test]
    fn compiles_named_requirement_set() {
        let config = parse(
            r#"
requirements:
  create_pet:
    - book
    - pet:
        owner: name
"#,
        );
        let spec = config.requirement_set("create_pet").unwrap();
        assert_eq!(spec.to_string(), "book, pet => owner => name");
    }

    #[test]
    fn unknown_requirement_set_errors() {
        let config = ParamsConfig::default();
        let err = config.requirement_set("nope").unwrap_err();
        assert!(matches!(err, ParamsError::UnknownRequirementSet { .. }));
    }

    #[test]
    fn malformed_set_is_a_spec_error() {
        let config = parse(
            r#"
requirements:
  broken:
    pet: 3
"#,
        );
        let err = config.requirement_set("broken").unwrap_err();
        assert!(matches!(
            err,
            ParamsError::Ensure(EnsureError::InvalidSpec { .. })
        ));
    }

    #[test]
    fn compile_all_reports_each_set() {
        let config = parse(
            r#"
settings:
  max_depth: 1
requirements:
  flat: [pet, vet]
  deep:
    pet: name
"#,
        );
        let compiled = config.compile_all();
        assert_eq!(compiled.len(), 2);

        let (name, result) = &compiled[0];
        assert_eq!(*name, "deep");
        assert_eq!(
            result.as_ref().unwrap_err(),
            &EnsureError::DepthLimitExceeded { limit: 1 }
        );

        let (name, result) = &compiled[1];
        assert_eq!(*name, "flat");
        assert!(result.is_ok());
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
