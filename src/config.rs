// Engine configuration

use crate::plot::ScatterStyle;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Transformation`](crate::Transformation) engine.
///
/// None of these settings change the numeric result of a transformation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformationConfig {
    /// Log a warning when a normalization is about to divide by a zero-width range.
    /// The normalization still runs and yields non-finite values.
    pub warn_on_degenerate_range: bool,
    /// Presentation defaults handed to scatter renderers.
    pub scatter_style: ScatterStyle,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        TransformationConfig {
            warn_on_degenerate_range: true,
            scatter_style: ScatterStyle::default(),
        }
    }
}
