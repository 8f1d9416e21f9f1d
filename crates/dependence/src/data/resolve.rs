//! Feature identifiers and name resolution.

use crate::error::{DependenceError, Result};

/// A feature, addressed by ordinal position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureId {
    Index(usize),
    Name(String),
}

impl From<usize> for FeatureId {
    fn from(index: usize) -> Self {
        FeatureId::Index(index)
    }
}

impl From<&str> for FeatureId {
    fn from(name: &str) -> Self {
        FeatureId::Name(name.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(name: String) -> Self {
        FeatureId::Name(name)
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureId::Index(i) => write!(f, "#{}", i),
            FeatureId::Name(name) => f.write_str(name),
        }
    }
}

/// Resolve a feature identifier to its ordinal position.
///
/// Ordinals are returned unchanged (range checks belong to the caller, which
/// knows the feature count). Names resolve to the first exact match.
///
/// # Errors
///
/// [`DependenceError::NotFound`] if the name is not in `names`.
pub fn resolve<S: AsRef<str>>(id: &FeatureId, names: &[S]) -> Result<usize> {
    match id {
        FeatureId::Index(i) => Ok(*i),
        FeatureId::Name(name) => names
            .iter()
            .position(|n| n.as_ref() == name)
            .ok_or_else(|| DependenceError::NotFound { name: name.clone() }),
    }
}

/// Ordered feature names, aligned with the feature axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureNames {
    names: Vec<String>,
}

impl FeatureNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Placeholder names `"Feature 0"`, `"Feature 1"`, ... for unnamed inputs.
    pub fn default_for(n_features: usize) -> Self {
        Self {
            names: (0..n_features).map(|i| format!("Feature {}", i)).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Resolve `id` against these names. See [`resolve`].
    pub fn resolve(&self, id: &FeatureId) -> Result<usize> {
        resolve(id, &self.names)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureNames {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
