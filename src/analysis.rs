// Descriptive statistics over named dataset variables

use crate::dataset::Dataset;
use crate::error::Result;
use ndarray::{Array1, ArrayView2, Axis};

/// Per-variable minimum of the named `headers`, in header order.
pub fn min<S: AsRef<str>>(dataset: &Dataset, headers: &[S]) -> Result<Array1<f64>> {
    Ok(column_min(dataset.select_data(headers)?.view()))
}

/// Per-variable maximum of the named `headers`, in header order.
pub fn max<S: AsRef<str>>(dataset: &Dataset, headers: &[S]) -> Result<Array1<f64>> {
    Ok(column_max(dataset.select_data(headers)?.view()))
}

/// Per-variable `(mins, maxs)` of the named `headers`.
pub fn range<S: AsRef<str>>(dataset: &Dataset, headers: &[S]) -> Result<(Array1<f64>, Array1<f64>)> {
    let selected = dataset.select_data(headers)?;
    Ok((column_min(selected.view()), column_max(selected.view())))
}

/// Per-variable arithmetic mean. NaN for a dataset with no samples.
pub fn mean<S: AsRef<str>>(dataset: &Dataset, headers: &[S]) -> Result<Array1<f64>> {
    let selected = dataset.select_data(headers)?;
    let n = selected.nrows() as f64;
    Ok(selected.sum_axis(Axis(0)) / n)
}

/// Per-variable sample variance (N - 1 denominator).
///
/// Variables of a dataset with fewer than two samples come back as NaN.
pub fn var<S: AsRef<str>>(dataset: &Dataset, headers: &[S]) -> Result<Array1<f64>> {
    let selected = dataset.select_data(headers)?;
    if selected.nrows() < 2 {
        return Ok(Array1::from_elem(selected.ncols(), f64::NAN));
    }
    Ok(selected.var_axis(Axis(0), 1.0))
}

/// Per-variable sample standard deviation.
pub fn std_dev<S: AsRef<str>>(dataset: &Dataset, headers: &[S]) -> Result<Array1<f64>> {
    Ok(var(dataset, headers)?.mapv(f64::sqrt))
}

/// Column-wise minimum. Columns of an empty array are `+inf`.
pub fn column_min(data: ArrayView2<f64>) -> Array1<f64> {
    data.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| acc.min(v))
}

/// Column-wise maximum. Columns of an empty array are `-inf`.
pub fn column_max(data: ArrayView2<f64>) -> Array1<f64> {
    data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| acc.max(v))
}

/// The single minimum and maximum over every entry of `data`.
pub fn global_min_max(data: ArrayView2<f64>) -> (f64, f64) {
    data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}
