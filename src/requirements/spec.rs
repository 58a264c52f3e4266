//! Requirement specifications.
//!
//! A [`RequirementSpec`] is an ordered list of [`Requirement`]s, each a key
//! that must be present plus an optional nested spec its value must satisfy.
//! Specs come from the builder methods or from a JSON/YAML literal:
//!
//! | Literal                         | Meaning                                    |
//! |---------------------------------|--------------------------------------------|
//! | `"pet"`                         | `pet` must be present                      |
//! | `{"pet": "name"}`               | `pet` must contain `name`                  |
//! | `{"pet": {"owner": "name"}}`    | `pet` must contain `owner` containing `name` |
//! | `{"magazine": ["price", "name"]}` | `magazine` must contain both keys        |
//! | `["book", {"pet": "name"}]`     | mixtures, checked in order                 |
//!
//! # Example
//!
//! ```
//! use ensure_params::requirements::RequirementSpec;
//! use serde_json::json;
//!
//! let parsed = RequirementSpec::from_value(&json!(["book", {"magazine": ["price", "name"]}]))
//!     .unwrap();
//! let built = RequirementSpec::new()
//!     .key("book")
//!     .nested_keys("magazine", ["price", "name"]);
//! assert_eq!(parsed, built);
//! ```

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::missing::EnsureError;

/// Default bound on nesting, for both specs and parsed parameters.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A single required key and what its value must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    key: String,
    child: Option<RequirementSpec>,
}

impl Requirement {
    /// The required key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Requirements on the key's value, if any.
    pub fn child(&self) -> Option<&RequirementSpec> {
        self.child.as_ref()
    }
}

/// An ordered set of requirements checked against one level of a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct RequirementSpec {
    entries: Vec<Requirement>,
}

impl RequirementSpec {
    /// An empty spec, satisfied by any tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a key to be present.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.entries.push(Requirement {
            key: key.into(),
            child: None,
        });
        self
    }

    /// Require several keys at this level, in order.
    pub fn keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().fold(self, |spec, key| spec.key(key))
    }

    /// Require a key whose value satisfies `child`.
    pub fn nested(mut self, key: impl Into<String>, child: RequirementSpec) -> Self {
        self.entries.push(Requirement {
            key: key.into(),
            child: Some(child),
        });
        self
    }

    /// Require a key whose value contains `child_key`.
    pub fn nested_key(self, key: impl Into<String>, child_key: impl Into<String>) -> Self {
        self.nested(key, RequirementSpec::new().key(child_key))
    }

    /// Require a key whose value contains each of `child_keys`.
    pub fn nested_keys<I, S>(self, key: impl Into<String>, child_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested(key, RequirementSpec::new().keys(child_keys))
    }

    /// Append another spec's requirements after this one's.
    pub fn merge(mut self, other: RequirementSpec) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// The requirements in declaration order.
    pub fn entries(&self) -> &[Requirement] {
        &self.entries
    }

    /// Number of requirements at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the spec requires nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of nested levels the spec descends into.
    pub fn depth(&self) -> usize {
        self.entries
            .iter()
            .map(|req| 1 + req.child.as_ref().map_or(0, RequirementSpec::depth))
            .max()
            .unwrap_or(0)
    }

    /// Every leaf requirement as a root-to-leaf key chain.
    pub fn paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        collect_paths(self, &mut Vec::new(), &mut out);
        out
    }

    /// Parse a spec literal using the default depth limit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` for values that are not keys, lists or mappings,
    /// and `DepthLimitExceeded` for literals nested past the limit.
    pub fn from_value(value: &Value) -> Result<Self, EnsureError> {
        Self::from_value_with_limit(value, DEFAULT_MAX_DEPTH)
    }

    /// Parse a spec literal, rejecting nesting deeper than `max_depth`.
    pub fn from_value_with_limit(value: &Value, max_depth: usize) -> Result<Self, EnsureError> {
        let mut spec = Self::new();
        spec.extend_from(value, &mut Vec::new(), max_depth)?;
        Ok(spec)
    }

    /// Parse a spec literal written as JSON.
    pub fn from_json_str(input: &str) -> Result<Self, EnsureError> {
        let value: Value = serde_json::from_str(input).map_err(|e| EnsureError::InvalidSpec {
            message: format!("not valid JSON: {}", e),
        })?;
        Self::from_value(&value)
    }

    /// Parse a spec literal written as YAML (or JSON, which YAML accepts).
    pub fn from_yaml_str(input: &str) -> Result<Self, EnsureError> {
        Self::from_yaml_str_with_limit(input, DEFAULT_MAX_DEPTH)
    }

    /// Parse a YAML spec literal, rejecting nesting deeper than `max_depth`.
    pub fn from_yaml_str_with_limit(input: &str, max_depth: usize) -> Result<Self, EnsureError> {
        let value: Value = serde_yaml::from_str(input).map_err(|e| EnsureError::InvalidSpec {
            message: format!("not valid YAML: {}", e),
        })?;
        Self::from_value_with_limit(&value, max_depth)
    }

    fn extend_from(
        &mut self,
        value: &Value,
        trail: &mut Vec<String>,
        max_depth: usize,
    ) -> Result<(), EnsureError> {
        if trail.len() >= max_depth {
            return Err(EnsureError::DepthLimitExceeded { limit: max_depth });
        }

        match value {
            Value::String(key) => {
                let key = checked_key(key, trail)?;
                self.entries.push(Requirement { key, child: None });
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(_) | Value::Object(_) => {
                            self.extend_from(item, trail, max_depth)?
                        }
                        other => {
                            return Err(invalid(
                                trail,
                                format!(
                                    "list entries must be keys or mappings, found {}",
                                    describe(other)
                                ),
                            ))
                        }
                    }
                }
            }
            Value::Object(map) => {
                for (key, child) in map {
                    let key = checked_key(key, trail)?;
                    trail.push(key.clone());
                    let nested = match child {
                        Value::String(_) | Value::Array(_) | Value::Object(_) => {
                            let mut nested = RequirementSpec::new();
                            nested.extend_from(child, trail, max_depth)?;
                            nested
                        }
                        other => {
                            return Err(invalid(
                                trail,
                                format!(
                                    "value must be a key, a list of keys, or a nested mapping, found {}",
                                    describe(other)
                                ),
                            ))
                        }
                    };
                    trail.pop();
                    self.entries.push(Requirement {
                        key,
                        child: Some(nested),
                    });
                }
            }
            other => {
                return Err(invalid(
                    trail,
                    format!(
                        "expected a key, a list, or a mapping, found {}",
                        describe(other)
                    ),
                ))
            }
        }

        Ok(())
    }
}

impl TryFrom<Value> for RequirementSpec {
    type Error = EnsureError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl fmt::Display for RequirementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<String> = self.paths().iter().map(|p| p.join(" => ")).collect();
        write!(f, "{}", paths.join(", "))
    }
}

fn collect_paths(spec: &RequirementSpec, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    for req in &spec.entries {
        prefix.push(req.key.clone());
        match &req.child {
            Some(child) if !child.is_empty() => collect_paths(child, prefix, out),
            _ => out.push(prefix.clone()),
        }
        prefix.pop();
    }
}

fn checked_key(key: &str, trail: &[String]) -> Result<String, EnsureError> {
    if key.is_empty() {
        return Err(invalid(trail, "keys must not be empty".to_string()));
    }
    Ok(key.to_string())
}

fn invalid(trail: &[String], message: String) -> EnsureError {
    let message = if trail.is_empty() {
        message
    } else {
        format!("{} (at {})", message, trail.join(" => "))
    };
    EnsureError::InvalidSpec { message }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_key() {
        let spec = RequirementSpec::from_value(&json!("pet")).unwrap();
        assert_eq!(spec, RequirementSpec::new().key("pet"));
        assert_eq!(spec.depth(), 1);
    }

    #[test]
    fn key_to_key() {
        let spec = RequirementSpec::from_value(&json!({ "pet": "name" })).unwrap();
        assert_eq!(spec, RequirementSpec::new().nested_key("pet", "name"));
        assert_eq!(spec.depth(), 2);
    }

    #[test]
    fn list_sugar_matches_nested_bare_keys() {
        let sugar = RequirementSpec::from_value(&json!({ "magazine": ["price", "name"] })).unwrap();
        let explicit = RequirementSpec::new().nested(
            "magazine",
            RequirementSpec::new().key("price").key("name"),
        );
        assert_eq!(sugar, explicit);
    }

    #[test]
    fn mixture_preserves_declaration_order() {
        let spec = RequirementSpec::from_value(&json!([
            "book",
            { "pet": { "owner": { "contact_info": "phone" } } },
            "vet"
        ]))
        .unwrap();

        let keys: Vec<_> = spec.entries().iter().map(Requirement::key).collect();
        assert_eq!(keys, vec!["book", "pet", "vet"]);
        assert_eq!(spec.depth(), 4);
    }

    #[test]
    fn mapping_order_is_kept() {
        let spec = RequirementSpec::from_json_str(r#"{"vet": "name", "ant": "name"}"#).unwrap();
        let keys: Vec<_> = spec.entries().iter().map(Requirement::key).collect();
        assert_eq!(keys, vec!["vet", "ant"]);
    }

    #[test]
    fn parses_yaml_literals() {
        let spec = RequirementSpec::from_yaml_str(
            r#"
- book
- pet:
    owner:
      contact_info: phone
"#,
        )
        .unwrap();
        assert_eq!(
            spec.paths(),
            vec![
                vec!["book".to_string()],
                vec![
                    "pet".to_string(),
                    "owner".to_string(),
                    "contact_info".to_string(),
                    "phone".to_string()
                ],
            ]
        );
    }

    #[test]
    fn null_child_is_invalid() {
        let err = RequirementSpec::from_value(&json!({ "pet": null })).unwrap_err();
        match err {
            EnsureError::InvalidSpec { message } => {
                assert!(message.contains("found null"));
                assert!(message.contains("at pet"));
            }
            other => panic!("expected InvalidSpec, got {:?}", other),
        }
    }

    #[test]
    fn numeric_child_reports_full_trail() {
        let err =
            RequirementSpec::from_value(&json!({ "pet": { "owner": 5 } })).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"Invalid requirement spec: value must be a key, a list of keys, or a nested mapping, found a number (at pet => owner)"
        );
    }

    #[test]
    fn top_level_scalar_is_invalid() {
        assert!(RequirementSpec::from_value(&json!(true))
            .unwrap_err()
            .is_spec_defect());
        assert!(RequirementSpec::from_value(&json!(null))
            .unwrap_err()
            .is_spec_defect());
    }

    #[test]
    fn nested_list_in_list_is_invalid() {
        let err = RequirementSpec::from_value(&json!(["pet", ["vet"]])).unwrap_err();
        assert!(matches!(err, EnsureError::InvalidSpec { .. }));
    }

    #[test]
    fn empty_key_is_invalid() {
        let err = RequirementSpec::from_value(&json!({ "pet": "" })).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn empty_literals_are_empty_specs() {
        assert!(RequirementSpec::from_value(&json!([])).unwrap().is_empty());
        assert!(RequirementSpec::from_value(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn depth_limit_applies_while_parsing() {
        let value = json!({ "a": { "b": "c" } });
        assert!(RequirementSpec::from_value_with_limit(&value, 3).is_ok());
        assert_eq!(
            RequirementSpec::from_value_with_limit(&value, 2).unwrap_err(),
            EnsureError::DepthLimitExceeded { limit: 2 }
        );
    }

    #[test]
    fn invalid_json_text_is_invalid_spec() {
        let err = RequirementSpec::from_json_str("{pet").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn deserializes_through_serde() {
        let spec: RequirementSpec = serde_json::from_str(r#"{"pet": ["name"]}"#).unwrap();
        assert_eq!(spec, RequirementSpec::new().nested_keys("pet", ["name"]));

        let bad: Result<RequirementSpec, _> = serde_json::from_str("42");
        assert!(bad.is_err());
    }

    #[test]
    fn display_lists_leaf_paths() {
        let spec = RequirementSpec::new()
            .key("book")
            .nested("pet", RequirementSpec::new().nested_key("owner", "name"))
            .nested_keys("magazine", ["price", "name"]);
        assert_eq!(
            spec.to_string(),
            "book, pet => owner => name, magazine => price, magazine => name"
        );
    }

    #[test]
    fn merge_appends_in_order() {
        let merged = RequirementSpec::new()
            .key("pet")
            .merge(RequirementSpec::new().keys(["vet", "owner"]));
        assert_eq!(merged, RequirementSpec::new().keys(["pet", "vet", "owner"]));
        assert_eq!(merged.len(), 3);
    }
}
