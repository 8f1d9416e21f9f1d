//! Error types.
//!
//! Every failure is detected before any computation starts: names are
//! resolved, shapes are compared and modes are checked up-front. A feature
//! with near-zero magnitude is not an error; the ranker scores it 0.

use crate::config::ConfigError;

/// Errors returned by ranking, encoding and panel selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DependenceError {
    /// A named feature identifier does not appear in the name list.
    #[error("could not find feature named: {name}")]
    NotFound { name: String },

    /// An ordinal feature identifier is outside the feature axis.
    #[error("feature index {index} out of range for {n_features} features")]
    IndexOutOfRange { index: usize, n_features: usize },

    /// Input arrays disagree in instance or feature count.
    #[error("{what}: expected shape {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A display label maps to more than one raw value.
    #[error("display value '{label}' maps to both {first} and {second}")]
    InconsistentCategory {
        label: String,
        first: f64,
        second: f64,
    },

    /// The target/coloring request does not fit the attribution kind.
    #[error("invalid mode: {0}")]
    InvalidMode(&'static str),

    /// Configuration failed validation.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl DependenceError {
    pub(crate) fn shape(what: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            what,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DependenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = DependenceError::NotFound { name: "age".into() };
        assert_eq!(err.to_string(), "could not find feature named: age");

        let err = DependenceError::shape("attributions", &[4, 2], &[4, 3]);
        assert_eq!(err.to_string(), "attributions: expected shape [4, 2], got [4, 3]");
    }

    #[test]
    fn config_error_converts() {
        let err: DependenceError = ConfigError::InvalidSubsampleCap.into();
        assert!(matches!(err, DependenceError::InvalidConfig(_)));
    }
}
