//! Error types for projection and homogeneous transformation operations.

use thiserror::Error;

/// Errors that can occur while projecting or transforming a dataset.
///
/// A zero-width min/max range during normalization is deliberately not represented here:
/// it is a caller precondition and shows up as non-finite values in the result.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A header name is not present in the dataset it was looked up in.
    #[error("unknown header '{header}'")]
    UnknownHeader {
        /// The header that could not be found.
        header: String,
    },

    /// A matrix or magnitude list does not fit the current number of projected variables.
    #[error("shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Which operation detected the mismatch.
        context: &'static str,
        /// The shape the operation required.
        expected: (usize, usize),
        /// The shape it was given.
        found: (usize, usize),
    },

    /// An operation needed a projected dataset before `project` was ever called.
    #[error("no projected dataset; call project() first")]
    NotProjected,

    /// 3D rotation requested while the projected dataset does not have 3 variables.
    #[error("3D rotation requires exactly 3 projected variables, found {found}")]
    RotationDimension {
        /// Number of variables in the current projection.
        found: usize,
    },

    /// A header list used for projection or selection was empty.
    #[error("at least one header is required")]
    EmptySelection,

    /// A row index is outside the dataset.
    #[error("row {index} out of bounds for dataset with {num_samples} samples")]
    RowOutOfBounds {
        /// The offending row index.
        index: usize,
        /// Number of samples in the dataset.
        num_samples: usize,
    },

    /// Dataset constructor arguments violate the header/column invariant.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A scatter renderer failed.
    #[error("render failed: {0}")]
    Render(String),

    /// A scatter plot could not be serialized.
    #[error("failed to serialize scatter plot: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for projection and transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    pub(crate) fn unknown_header(header: &str) -> Self {
        Self::UnknownHeader {
            header: header.to_string(),
        }
    }
}
