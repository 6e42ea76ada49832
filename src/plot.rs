// Scatter plot description and the renderer seam
//
// Pixel rendering lives outside this crate. A `ScatterPlot` carries everything a charting
// front end needs, and `ScatterRenderer` is the hook that hands it over.

use crate::error::{Result, TransformError};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Presentation defaults for a color-encoded scatter plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterStyle {
    /// Figure size in inches, (width, height).
    pub figure_size: (f64, f64),
    /// Marker area in points^2.
    pub marker_size: f64,
    pub edge_color: String,
    /// Name of a ColorBrewer palette.
    pub color_map: String,
    pub show_grid: bool,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        ScatterStyle {
            figure_size: (12.0, 8.0),
            marker_size: 75.0,
            edge_color: "black".to_string(),
            color_map: "colorbrewer.sequential.Purples_9".to_string(),
            show_grid: false,
        }
    }
}

/// A 2D scatter plot whose marker color encodes a third variable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    /// Colorbar title; the name of the color variable.
    pub color_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Vec<f64>,
    pub style: ScatterStyle,
}

impl ScatterPlot {
    pub fn num_points(&self) -> usize {
        self.x.len()
    }
}

/// Something that can draw a [`ScatterPlot`].
pub trait ScatterRenderer {
    fn render(&mut self, plot: &ScatterPlot) -> Result<()>;
}

/// Writes each plot as one JSON document per line.
pub struct JsonScatterRenderer<W: Write> {
    writer: W,
}

impl<W: Write> JsonScatterRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ScatterRenderer for JsonScatterRenderer<W> {
    fn render(&mut self, plot: &ScatterPlot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, plot)?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .map_err(|e| TransformError::Render(format!("failed to write scatter plot: {}", e)))
    }
}
