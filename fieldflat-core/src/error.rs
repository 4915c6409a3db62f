//! Flattening Errors

use thiserror::Error;

/// Errors returned by the flattening entry points.
///
/// Classification of nested values never fails; only the top-level input of a
/// call can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FlattenError {
    /// The top-level input was not of the kind the operation requires.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the operation accepts ("record" or "list")
        expected: &'static str,
        /// Kind of the value that was passed
        found: &'static str,
    },
}

impl FlattenError {
    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        FlattenError::TypeMismatch { expected, found }
    }
}
