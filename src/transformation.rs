// Projection and homogeneous transformation of a tabular dataset

use crate::analysis::{column_max, column_min, global_min_max};
use crate::config::TransformationConfig;
use crate::dataset::Dataset;
use crate::error::{Result, TransformError};
use crate::matrix::{self, Axis3};
use crate::plot::{ScatterPlot, ScatterRenderer};
use float_cmp::approx_eq;
use log::{debug, info, warn};
use ndarray::{Array1, Array2};

/// Projects an original dataset onto a subset of its variables and applies homogeneous
/// affine transformations to that projection.
///
/// The original dataset is never modified. Every transformation builds a new projected
/// [`Dataset`] and swaps it in; nothing else is kept, so there is no history to undo.
///
/// # Examples
///
/// ```
/// use homogeneous_transform::{Dataset, Transformation};
/// use ndarray::array;
///
/// let original = Dataset::from_headers(
///     vec!["x", "y", "z"],
///     array![[0.0, 0.0, 1.0], [10.0, 0.0, 2.0], [0.0, 10.0, 3.0], [10.0, 10.0, 4.0]],
/// ).unwrap();
/// let mut tr = Transformation::new(original);
/// tr.project(&["x", "y"]).unwrap();
/// tr.translate(&[5.0, 5.0]).unwrap();
/// let scaled = tr.scale(&[0.1, 0.1]).unwrap();
/// assert!((scaled[[3, 0]] - 1.5).abs() < 1e-12);
/// assert!((scaled[[3, 1]] - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Transformation {
    /// Source of truth for projection and plotting.
    orig_dataset: Dataset,
    /// Current projected dataset. `None` until the first projection.
    data: Option<Dataset>,
    config: TransformationConfig,
}

impl Transformation {
    /// Creates an engine over `orig_dataset` with no projection yet.
    pub fn new(orig_dataset: Dataset) -> Self {
        Self::with_config(orig_dataset, TransformationConfig::default())
    }

    pub fn with_config(orig_dataset: Dataset, config: TransformationConfig) -> Self {
        Self {
            orig_dataset,
            data: None,
            config,
        }
    }

    /// Creates an engine whose current projection is `data`.
    ///
    /// `data` must hold the same samples as `orig_dataset` over a subset of its variables;
    /// only the sample count is checked.
    pub fn with_projection(orig_dataset: Dataset, data: Dataset) -> Result<Self> {
        if data.get_num_samples() != orig_dataset.get_num_samples() {
            return Err(TransformError::InvalidDataset(format!(
                "projected dataset has {} samples but the original has {}",
                data.get_num_samples(),
                orig_dataset.get_num_samples()
            )));
        }
        let mut tr = Self::new(orig_dataset);
        tr.data = Some(data);
        Ok(tr)
    }

    pub fn original(&self) -> &Dataset {
        &self.orig_dataset
    }

    /// The current projected dataset.
    pub fn data(&self) -> Result<&Dataset> {
        self.data.as_ref().ok_or(TransformError::NotProjected)
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    /// Replaces the current projection with the original dataset's `headers` columns.
    ///
    /// The new projection's header `i` maps to column `i`. On error the previous projection
    /// is left untouched.
    pub fn project<S: AsRef<str>>(&mut self, headers: &[S]) -> Result<()> {
        let selected = self.orig_dataset.select_data(headers)?;
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();
        debug!(
            "Projecting onto {:?}: {} samples x {} variables",
            headers,
            selected.nrows(),
            selected.ncols()
        );
        self.data = Some(Dataset::from_headers(headers, selected)?);
        Ok(())
    }

    /// The projected data with a trailing column of ones. Shape: (n_samples, n_vars + 1)
    pub fn get_data_homogeneous(&self) -> Result<Array2<f64>> {
        Ok(matrix::homogeneous(self.data()?.data()))
    }

    /// Translation matrix for the current projection.
    ///
    /// # Errors
    /// `ShapeMismatch` unless there is one magnitude per projected variable.
    pub fn translation_matrix(&self, magnitudes: &[f64]) -> Result<Array2<f64>> {
        self.check_magnitudes(magnitudes, "translation_matrix")?;
        Ok(matrix::translation_matrix(magnitudes))
    }

    /// Scale matrix for the current projection.
    ///
    /// # Errors
    /// `ShapeMismatch` unless there is one magnitude per projected variable.
    pub fn scale_matrix(&self, magnitudes: &[f64]) -> Result<Array2<f64>> {
        self.check_magnitudes(magnitudes, "scale_matrix")?;
        Ok(matrix::scale_matrix(magnitudes))
    }

    /// 4x4 rotation by `degrees` about the projected variable `header`.
    ///
    /// Column 0, 1, 2 of the projection are treated as x, y, z.
    ///
    /// # Errors
    /// `RotationDimension` unless exactly 3 variables are projected, `UnknownHeader` if
    /// `header` is not one of them.
    pub fn rotation_matrix_3d(&self, header: &str, degrees: f64) -> Result<Array2<f64>> {
        let data = self.data()?;
        if data.get_num_dims() != 3 {
            return Err(TransformError::RotationDimension {
                found: data.get_num_dims(),
            });
        }
        let index = *data
            .get_mappings()
            .get(header)
            .ok_or_else(|| TransformError::unknown_header(header))?;
        let axis = Axis3::from_index(index).ok_or(TransformError::RotationDimension {
            found: data.get_num_dims(),
        })?;
        Ok(matrix::rotation_matrix_about(axis, degrees))
    }

    /// Applies homogeneous matrix `c` to the projected data and installs the result as the
    /// new projection, keeping headers and mapping. Returns a copy of the new data.
    ///
    /// # Errors
    /// `ShapeMismatch` if `c` is not `(n_vars + 1, n_vars + 1)`; the projection is unchanged.
    pub fn transform(&mut self, c: &Array2<f64>) -> Result<Array2<f64>> {
        let current = self.data()?;
        debug!(
            "Applying {}x{} homogeneous matrix to {} samples",
            c.nrows(),
            c.ncols(),
            current.get_num_samples()
        );
        let transformed = matrix::apply(c, current.data())?;
        let next = Dataset::new(
            current.get_headers().to_vec(),
            transformed.clone(),
            current.get_mappings().clone(),
        )?;
        self.data = Some(next);
        Ok(transformed)
    }

    /// Shifts projected variable `i` by `magnitudes[i]`.
    pub fn translate(&mut self, magnitudes: &[f64]) -> Result<Array2<f64>> {
        let t = self.translation_matrix(magnitudes)?;
        self.transform(&t)
    }

    /// Multiplies projected variable `i` by `magnitudes[i]`.
    pub fn scale(&mut self, magnitudes: &[f64]) -> Result<Array2<f64>> {
        let s = self.scale_matrix(magnitudes)?;
        self.transform(&s)
    }

    /// Rotates a 3-variable projection by `degrees` about the variable `header`.
    pub fn rotate_3d(&mut self, header: &str, degrees: f64) -> Result<Array2<f64>> {
        let r = self.rotation_matrix_3d(header, degrees)?;
        self.transform(&r)
    }

    /// Maps the global minimum over all projected variables to 0 and the global maximum
    /// to 1, applying the same translation and scale to every variable.
    ///
    /// Precondition: the projected data is not constant. Otherwise the scale factor is
    /// `1 / 0` and the result is non-finite.
    pub fn normalize_together(&mut self) -> Result<Array2<f64>> {
        let data = self.data()?;
        let n_vars = data.get_num_dims();
        let (lo, hi) = global_min_max(data.data());
        if self.config.warn_on_degenerate_range && approx_eq!(f64, lo, hi, ulps = 2) {
            warn!(
                "normalize_together: global min and max are both {}; result will not be finite",
                lo
            );
        }

        self.translate(&vec![-lo; n_vars])?;
        let normalized = self.scale(&vec![1.0 / (hi - lo); n_vars])?;
        info!("Normalized {} variables together over [{}, {}]", n_vars, lo, hi);
        Ok(normalized)
    }

    /// Maps each projected variable's own minimum to 0 and maximum to 1, as one combined
    /// translate-then-scale matrix.
    ///
    /// Precondition: no projected variable is constant.
    pub fn normalize_separately(&mut self) -> Result<Array2<f64>> {
        let data = self.data()?;
        let mins = column_min(data.data());
        let maxs = column_max(data.data());
        if self.config.warn_on_degenerate_range {
            self.warn_degenerate_columns(data, &mins, &maxs);
        }

        let translation = matrix::translation_matrix(&(-&mins).to_vec());
        let scale = matrix::scale_matrix(&(1.0 / (&maxs - &mins)).to_vec());
        let combined = matrix::compose(&[translation, scale])?;
        let normalized = self.transform(&combined)?;
        info!("Normalized {} variables separately", mins.len());
        Ok(normalized)
    }

    /// Builds a scatter plot of `ind_var` against `dep_var`, colored by `c_var`, from the
    /// ORIGINAL dataset. The projection plays no part.
    pub fn scatter_plot(
        &self,
        ind_var: &str,
        dep_var: &str,
        c_var: &str,
        title: Option<&str>,
    ) -> Result<ScatterPlot> {
        let column = |header: &str| -> Result<Vec<f64>> {
            Ok(self.orig_dataset.select_data(&[header])?.iter().copied().collect())
        };
        Ok(ScatterPlot {
            title: title.map(str::to_string),
            x_label: ind_var.to_string(),
            y_label: dep_var.to_string(),
            color_label: c_var.to_string(),
            x: column(ind_var)?,
            y: column(dep_var)?,
            color: column(c_var)?,
            style: self.config.scatter_style.clone(),
        })
    }

    /// Builds the scatter plot for `ind_var`, `dep_var`, and `c_var` and renders it.
    pub fn scatter_color<R: ScatterRenderer + ?Sized>(
        &self,
        ind_var: &str,
        dep_var: &str,
        c_var: &str,
        title: Option<&str>,
        renderer: &mut R,
    ) -> Result<()> {
        let plot = self.scatter_plot(ind_var, dep_var, c_var, title)?;
        debug!(
            "Rendering scatter of {} vs {} colored by {} ({} points)",
            dep_var,
            ind_var,
            c_var,
            plot.num_points()
        );
        renderer.render(&plot)
    }

    fn check_magnitudes(&self, magnitudes: &[f64], context: &'static str) -> Result<()> {
        let n_vars = self.data()?.get_num_dims();
        if magnitudes.len() != n_vars {
            return Err(TransformError::ShapeMismatch {
                context,
                expected: (n_vars, 1),
                found: (magnitudes.len(), 1),
            });
        }
        Ok(())
    }

    fn warn_degenerate_columns(&self, data: &Dataset, mins: &Array1<f64>, maxs: &Array1<f64>) {
        for (header, (&lo, &hi)) in data.get_headers().iter().zip(mins.iter().zip(maxs.iter())) {
            if approx_eq!(f64, lo, hi, ulps = 2) {
                warn!(
                    "normalize_separately: variable '{}' is constant ({}); result will not be finite",
                    header, lo
                );
            }
        }
    }
}
