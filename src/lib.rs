// Homogeneous affine transformations of projected tabular data

#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod matrix;
pub mod plot;
pub mod transformation;

#[cfg(test)]
mod transformation_tests;

pub use config::TransformationConfig;
pub use dataset::Dataset;
pub use error::{Result, TransformError};
pub use matrix::Axis3;
pub use plot::{JsonScatterRenderer, ScatterPlot, ScatterRenderer, ScatterStyle};
pub use transformation::Transformation;
