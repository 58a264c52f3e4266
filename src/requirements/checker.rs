//! Requirement checking.
//!
//! The [`RequirementChecker`] walks a [`RequirementSpec`] and a
//! [`ParameterTree`] in lockstep, depth first and in declaration order,
//! stopping at the first absent key. A parent key must be present before its
//! children are looked at, so a missing parent is reported on its own.
//!
//! Success hands back the tree that was passed in, so checks chain:
//!
//! ```
//! use ensure_params::params::ParameterTree;
//! use ensure_params::requirements::{Ensure, RequirementSpec};
//! use serde_json::json;
//!
//! let tree = ParameterTree::from(json!({ "pet": "JoJo", "vet": "Doolittle" }));
//! let checked = tree
//!     .ensure(&RequirementSpec::new().key("pet"))
//!     .and_then(|t| t.ensure(&RequirementSpec::new().key("owner")));
//!
//! assert_eq!(
//!     checked.unwrap_err().to_string(),
//!     "Required parameter missing: owner"
//! );
//! ```

use crate::params::ParameterTree;

use super::missing::{EnsureError, MissingPath};
use super::spec::{RequirementSpec, DEFAULT_MAX_DEPTH};

/// Checks parameter trees against requirement specs.
///
/// Holds only its depth limit, so one checker can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementChecker {
    max_depth: usize,
}

impl Default for RequirementChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementChecker {
    /// Create a checker with the default depth limit.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a checker that refuses specs nested deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The configured depth limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Check `tree` against `spec`, returning `tree` unchanged on success.
    ///
    /// # Errors
    ///
    /// Returns `Missing` with the path to the first absent key, or
    /// `DepthLimitExceeded` if `spec` nests past this checker's limit.
    pub fn ensure<'t>(
        &self,
        tree: &'t ParameterTree,
        spec: &RequirementSpec,
    ) -> Result<&'t ParameterTree, EnsureError> {
        self.check_level(tree, spec, 1)?;
        Ok(tree)
    }

    /// Check `tree` against each spec in turn, as a chain of `ensure` calls.
    pub fn ensure_all<'t>(
        &self,
        tree: &'t ParameterTree,
        specs: &[RequirementSpec],
    ) -> Result<&'t ParameterTree, EnsureError> {
        specs
            .iter()
            .try_fold(tree, |tree, spec| self.ensure(tree, spec))
    }

    fn check_level(
        &self,
        tree: &ParameterTree,
        spec: &RequirementSpec,
        depth: usize,
    ) -> Result<(), EnsureError> {
        if spec.is_empty() {
            return Ok(());
        }
        if depth > self.max_depth {
            return Err(EnsureError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        for requirement in spec.entries() {
            let key = requirement.key();
            let value = tree.get(key).ok_or_else(|| MissingPath::new(key))?;

            if let Some(child) = requirement.child() {
                self.check_level(value, child, depth + 1)
                    .map_err(|e| e.within(key))?;
            }
        }

        Ok(())
    }
}

/// Check `tree` against `spec` with a default checker.
pub fn ensure<'t>(
    tree: &'t ParameterTree,
    spec: &RequirementSpec,
) -> Result<&'t ParameterTree, EnsureError> {
    RequirementChecker::default().ensure(tree, spec)
}

/// Fluent checking on parameter trees.
pub trait Ensure {
    /// Check `self` against `spec`, returning `self` on success.
    fn ensure(&self, spec: &RequirementSpec) -> Result<&Self, EnsureError>;
}

impl Ensure for ParameterTree {
    fn ensure(&self, spec: &RequirementSpec) -> Result<&Self, EnsureError> {
        ensure(self, spec)
    }
}
