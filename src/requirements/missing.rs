//! Outcome types for requirement checks.
//!
//! A failed check produces an [`EnsureError`]. The expected, per-request
//! case is [`EnsureError::Missing`], which carries the [`MissingPath`] to the
//! first absent key. The other variants mean the requirement spec itself is
//! broken and should be fixed in code.

use serde::Serialize;
use thiserror::Error;

/// Keys from the tree root to the first required key that was absent.
///
/// Every key except the last was present. Displays as the message request
/// layers send back to clients, e.g.
/// `Required parameter missing: pet => owner => name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(transparent)]
#[error("Required parameter missing: {}", .0.join(" => "))]
pub struct MissingPath(Vec<String>);

impl MissingPath {
    /// A path consisting of a single missing key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(vec![key.into()])
    }

    /// Build a path from root-to-leaf keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// The keys, root first.
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// The absent key itself.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The keys joined with ` => `.
    pub fn joined(&self) -> String {
        self.0.join(" => ")
    }

    /// Put a parent key in front of this path.
    pub(crate) fn within(mut self, parent: &str) -> Self {
        self.0.insert(0, parent.to_string());
        self
    }
}

/// Why a requirement check did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnsureError {
    /// A required key is absent from the parameters.
    #[error(transparent)]
    Missing(#[from] MissingPath),

    /// The requirement spec is malformed.
    #[error("Invalid requirement spec: {message}")]
    InvalidSpec { message: String },

    /// The requirement spec nests deeper than the checker allows.
    #[error("Requirement spec exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },
}

impl EnsureError {
    /// Whether this is the ordinary missing-parameter outcome.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Whether this points at a defect in the requirement spec.
    pub fn is_spec_defect(&self) -> bool {
        !self.is_missing()
    }

    /// The missing path, if this is a missing-parameter outcome.
    pub fn missing_path(&self) -> Option<&MissingPath> {
        match self {
            Self::Missing(path) => Some(path),
            _ => None,
        }
    }

    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            Self::Missing(path) => Self::Missing(path.within(parent)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_key_message() {
        let path = MissingPath::new("pet");
        insta::assert_snapshot!(path.to_string(), @"Required parameter missing: pet");
    }

    #[test]
    fn nested_key_message() {
        let path = MissingPath::from_keys(["pet", "owner", "name"]);
        insta::assert_snapshot!(
            path.to_string(),
            @"Required parameter missing: pet => owner => name"
        );
        assert_eq!(path.leaf(), Some("name"));
        assert_eq!(path.joined(), "pet => owner => name");
    }

    #[test]
    fn within_prepends_parent() {
        let path = MissingPath::new("name").within("owner").within("pet");
        assert_eq!(path.keys(), ["pet", "owner", "name"]);
    }

    #[test]
    fn missing_error_displays_path_message() {
        let err = EnsureError::from(MissingPath::from_keys(["pet", "name"]));
        assert_eq!(err.to_string(), "Required parameter missing: pet => name");
        assert!(err.is_missing());
        assert!(!err.is_spec_defect());
    }

    #[test]
    fn spec_errors_are_defects() {
        let invalid = EnsureError::InvalidSpec {
            message: "bad".into(),
        };
        let deep = EnsureError::DepthLimitExceeded { limit: 3 };
        assert!(invalid.is_spec_defect());
        assert!(deep.is_spec_defect());
        assert!(invalid.missing_path().is_none());
        assert!(deep.to_string().contains('3'));
    }

    #[test]
    fn within_leaves_spec_errors_alone() {
        let err = EnsureError::DepthLimitExceeded { limit: 3 }.within("pet");
        assert_eq!(err, EnsureError::DepthLimitExceeded { limit: 3 });
    }

    #[test]
    fn serializes_as_key_list() {
        let path = MissingPath::from_keys(["pet", "name"]);
        assert_eq!(
            serde_json::to_string(&path).unwrap(),
            r#"["pet","name"]"#
        );
    }
}
