//! Reading parameter payloads from files.
//!
//! The payload format follows the file extension: `.json` is parsed as JSON,
//! `.yml`/`.yaml` as YAML, anything else as a query string or form body.

use std::fs;
use std::path::Path;

use super::{parse_query_with_limit, ParameterTree};
use crate::error::{ParamsError, Result};

/// Payload formats a parameter file can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// A JSON document.
    Json,
    /// A YAML document.
    Yaml,
    /// `application/x-www-form-urlencoded` text.
    Query,
}

impl PayloadFormat {
    /// Pick a format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yml") | Some("yaml") => Self::Yaml,
            _ => Self::Query,
        }
    }
}

/// Parse a payload held in memory.
///
/// `source_name` is only used in error messages.
pub fn parse_payload(
    content: &str,
    format: PayloadFormat,
    source_name: &str,
    max_depth: usize,
) -> Result<ParameterTree> {
    let parse_error = |message: String| ParamsError::ParamsParseError {
        source_name: source_name.to_string(),
        message,
    };

    match format {
        PayloadFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Ok(ParameterTree::from(value))
        }
        PayloadFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Ok(ParameterTree::try_from(value)?)
        }
        PayloadFormat::Query => Ok(parse_query_with_limit(content, max_depth)?),
    }
}

/// Read and parse a parameter file.
///
/// # Errors
///
/// Returns `Io` if the file can't be read and `ParamsParseError` or `Tree`
/// if its content can't be turned into a tree.
pub fn load_params_file(path: &Path, max_depth: usize) -> Result<ParameterTree> {
    tracing::debug!("Loading parameters from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_payload(
        &content,
        PayloadFormat::from_path(path),
        &path.display().to_string(),
        max_depth,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TreeError;
    use tempfile::TempDir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            PayloadFormat::from_path(Path::new("body.json")),
            PayloadFormat::Json
        );
        assert_eq!(
            PayloadFormat::from_path(Path::new("body.YAML")),
            PayloadFormat::Yaml
        );
        assert_eq!(
            PayloadFormat::from_path(Path::new("body.yml")),
            PayloadFormat::Yaml
        );
        assert_eq!(
            PayloadFormat::from_path(Path::new("body.txt")),
            PayloadFormat::Query
        );
        assert_eq!(
            PayloadFormat::from_path(Path::new("body")),
            PayloadFormat::Query
        );
    }

    #[test]
    fn loads_each_format() {
        let temp = TempDir::new().unwrap();
        let json = temp.path().join("params.json");
        let yaml = temp.path().join("params.yml");
        let query = temp.path().join("params.txt");
        fs::write(&json, r#"{"pet": {"name": "Toto"}}"#).unwrap();
        fs::write(&yaml, "pet:\n  name: Toto\n").unwrap();
        fs::write(&query, "pet[name]=Toto\n").unwrap();

        for path in [json, yaml, query] {
            let tree = load_params_file(&path, 8).unwrap();
            assert!(tree.has_path(&["pet", "name"]), "{}", path.display());
        }
    }

    #[test]
    fn invalid_json_names_the_source() {
        let err = parse_payload("{", PayloadFormat::Json, "body.json", 8).unwrap_err();
        match err {
            ParamsError::ParamsParseError { source_name, .. } => {
                assert_eq!(source_name, "body.json")
            }
            other => panic!("expected ParamsParseError, got {:?}", other),
        }
    }

    #[test]
    fn query_depth_limit_applies() {
        let err = parse_payload("a[b][c]=1", PayloadFormat::Query, "inline", 2).unwrap_err();
        assert!(matches!(
            err,
            ParamsError::Tree(TreeError::DepthLimitExceeded { limit: 2 })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_params_file(Path::new("/nonexistent/params.json"), 8).unwrap_err();
        assert!(matches!(err, ParamsError::Io(_)));
    }
}
