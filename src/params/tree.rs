//! The parameter tree the checker reads.
//!
//! A [`ParameterTree`] is whatever the request layer parsed out of a body or
//! query string, normalized so every mapping key is a `String`. Only key
//! presence matters to the checker; scalar values are carried opaquely.

use std::collections::BTreeMap;

use super::TreeError;

/// A leaf value. Its content never affects presence checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Explicit null / nil.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value (everything a form post delivers).
    Text(String),
}

/// Recursively nested request parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterTree {
    /// A leaf value.
    Scalar(Scalar),
    /// Keyed children.
    Mapping(BTreeMap<String, ParameterTree>),
    /// Positional children.
    Sequence(Vec<ParameterTree>),
}

impl Default for ParameterTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl ParameterTree {
    /// An empty mapping, the shape of a request with no parameters.
    pub fn empty() -> Self {
        Self::Mapping(BTreeMap::new())
    }

    /// A text scalar.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    /// A null scalar.
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Build a mapping from key/value pairs.
    pub fn mapping<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ParameterTree)>,
        K: Into<String>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a direct child by key. Non-mappings have no children.
    pub fn get(&self, key: &str) -> Option<&ParameterTree> {
        match self {
            Self::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Whether `key` is present at this level, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether this node is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Whether the chain of keys resolves through nested mappings.
    pub fn has_path<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        let mut node = self;
        for key in keys {
            match node.get(key.as_ref()) {
                Some(child) => node = child,
                None => return false,
            }
        }
        true
    }

    /// Top-level keys, empty for non-mappings.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Mapping(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Value> for ParameterTree {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Scalar(Scalar::Integer(i)),
                None => Self::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Self::Scalar(Scalar::Text(s)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl TryFrom<serde_yaml::Value> for ParameterTree {
    type Error = TreeError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Scalar(Scalar::Integer(i)),
                None => Self::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Self::Scalar(Scalar::Text(s)),
            Value::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(map) => {
                let mut out = BTreeMap::new();
                for (k, v) in map {
                    out.insert(yaml_key(k)?, Self::try_from(v)?);
                }
                Self::Mapping(out)
            }
            Value::Tagged(tagged) => Self::try_from(tagged.value)?,
        })
    }
}

/// Normalize a YAML mapping key to the string identifier the checker uses.
fn yaml_key(key: serde_yaml::Value) -> Result<String, TreeError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(TreeError::UnsupportedKey {
            key: format!("{:?}", other),
        }),
    }
}
