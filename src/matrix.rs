// Homogeneous coordinates and affine transformation matrices
//
// Data arrays are (n_samples, n_vars). A homogeneous matrix for n_vars variables is
// (n_vars + 1, n_vars + 1) and acts on column vectors, so it is applied to the
// transposed homogeneous data: (C . Dh^T)^T.

use crate::error::{Result, TransformError};
use log::trace;
use ndarray::{s, Array2, ArrayView2};

/// Appends a column of ones to `data`. Shape: (n_samples, n_vars + 1)
pub fn homogeneous(data: ArrayView2<f64>) -> Array2<f64> {
    let n_vars = data.ncols();
    let mut dh = Array2::<f64>::ones((data.nrows(), n_vars + 1));
    dh.slice_mut(s![.., ..n_vars]).assign(&data);
    dh
}

/// Identity of size `n + 1` with the first `n` rows of the last column set to `magnitudes`.
pub fn translation_matrix(magnitudes: &[f64]) -> Array2<f64> {
    let n = magnitudes.len();
    let mut t = Array2::<f64>::eye(n + 1);
    for (i, &m) in magnitudes.iter().enumerate() {
        t[[i, n]] = m;
    }
    trace!("Built {}x{} translation matrix", n + 1, n + 1);
    t
}

/// Identity of size `n + 1` with the first `n` diagonal entries set to `magnitudes`.
pub fn scale_matrix(magnitudes: &[f64]) -> Array2<f64> {
    let n = magnitudes.len();
    let mut m = Array2::<f64>::eye(n + 1);
    for (i, &factor) in magnitudes.iter().enumerate() {
        m[[i, i]] = factor;
    }
    trace!("Built {}x{} scale matrix", n + 1, n + 1);
    m
}

/// One of the three coordinate axes of a 3-variable projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis3 {
    X,
    Y,
    Z,
}

impl Axis3 {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis3::X),
            1 => Some(Axis3::Y),
            2 => Some(Axis3::Z),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis3::X => 0,
            Axis3::Y => 1,
            Axis3::Z => 2,
        }
    }

    /// The `(a, b)` plane rotated about this axis, ordered so that writing
    /// `[[cos, -sin], [sin, cos]]` into rows/columns `a, b` gives a right-handed rotation.
    ///
    /// About Y the plane is (Z, X), which puts `+sin` at `[0, 2]` and `-sin` at `[2, 0]`.
    pub fn rotated_plane(self) -> (usize, usize) {
        match self {
            Axis3::X => (1, 2),
            Axis3::Y => (2, 0),
            Axis3::Z => (0, 1),
        }
    }
}

/// 4x4 homogeneous rotation by `degrees` about `axis`.
pub fn rotation_matrix_about(axis: Axis3, degrees: f64) -> Array2<f64> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (a, b) = axis.rotated_plane();
    let mut r = Array2::<f64>::eye(4);
    r[[a, a]] = cos;
    r[[a, b]] = -sin;
    r[[b, a]] = sin;
    r[[b, b]] = cos;
    trace!("Built rotation matrix about {:?} by {} degrees", axis, degrees);
    r
}

/// Multiplies `matrices` given in application order: `[m1, m2, m3]` yields `m3 . m2 . m1`,
/// which applies `m1` first.
///
/// # Errors
/// `ShapeMismatch` if `matrices` is empty, or if any matrix is not square with the same
/// size as the first.
pub fn compose(matrices: &[Array2<f64>]) -> Result<Array2<f64>> {
    let Some(first) = matrices.first() else {
        return Err(TransformError::ShapeMismatch {
            context: "compose",
            expected: (1, 1),
            found: (0, 0),
        });
    };
    let n = first.nrows();
    let mut combined = Array2::<f64>::eye(n);
    for m in matrices {
        check_square(m, n, "compose")?;
        combined = m.dot(&combined);
    }
    Ok(combined)
}

/// Applies homogeneous matrix `c` to `data`: `(c . homogeneous(data)^T)^T` with the
/// homogeneous column dropped. Always returns a fresh array.
///
/// # Errors
/// `ShapeMismatch` if `c` is not `(n_vars + 1, n_vars + 1)`.
pub fn apply(c: &Array2<f64>, data: ArrayView2<f64>) -> Result<Array2<f64>> {
    let n_vars = data.ncols();
    check_square(c, n_vars + 1, "transform")?;
    let dh = homogeneous(data);
    let transformed = c.dot(&dh.t()).reversed_axes();
    Ok(transformed.slice(s![.., ..n_vars]).to_owned())
}

fn check_square(m: &Array2<f64>, n: usize, context: &'static str) -> Result<()> {
    if m.dim() != (n, n) {
        return Err(TransformError::ShapeMismatch {
            context,
            expected: (n, n),
            found: m.dim(),
        });
    }
    Ok(())
}
