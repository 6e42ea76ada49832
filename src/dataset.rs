// Tabular numeric dataset: named columns over a 2D array

use crate::error::{Result, TransformError};
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A 2D numeric dataset with named variables.
///
/// Rows are samples, columns are variables. `header2col` maps every header to its column
/// index and is kept bijective with `headers`. Values are never mutated in place: every
/// transformation produces a new `Dataset`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    /// Variable names, in column order.
    headers: Vec<String>,
    /// Shape: (n_samples, n_vars)
    data: Array2<f64>,
    /// Header name to column index.
    header2col: HashMap<String, usize>,
}

impl Dataset {
    /// Creates a dataset from headers, data, and an explicit header-to-column mapping.
    ///
    /// # Errors
    /// Returns `InvalidDataset` if the column count, header count, and mapping size differ,
    /// if headers repeat, or if the mapping does not send each header to a distinct column
    /// in `0..n_vars`.
    pub fn new(
        headers: Vec<String>,
        data: Array2<f64>,
        header2col: HashMap<String, usize>,
    ) -> Result<Self> {
        let n_vars = data.ncols();
        if headers.len() != n_vars || header2col.len() != n_vars {
            return Err(TransformError::InvalidDataset(format!(
                "headers ({}), data columns ({}) and header2col entries ({}) must match",
                headers.len(),
                n_vars,
                header2col.len()
            )));
        }

        let mut seen = vec![false; n_vars];
        for header in &headers {
            let col = *header2col.get(header).ok_or_else(|| {
                TransformError::InvalidDataset(format!("header '{}' has no column mapping", header))
            })?;
            if col >= n_vars {
                return Err(TransformError::InvalidDataset(format!(
                    "header '{}' maps to column {} but data has {} columns",
                    header, col, n_vars
                )));
            }
            if seen[col] {
                return Err(TransformError::InvalidDataset(format!(
                    "column {} is mapped by more than one header",
                    col
                )));
            }
            seen[col] = true;
        }

        Ok(Self {
            headers,
            data,
            header2col,
        })
    }

    /// Creates a dataset whose mapping assigns column `i` to `headers[i]`.
    pub fn from_headers<S: Into<String>>(headers: Vec<S>, data: Array2<f64>) -> Result<Self> {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let header2col = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self::new(headers, data, header2col)
    }

    pub fn get_headers(&self) -> &[String] {
        &self.headers
    }

    pub fn get_mappings(&self) -> &HashMap<String, usize> {
        &self.header2col
    }

    pub fn get_num_dims(&self) -> usize {
        self.data.ncols()
    }

    pub fn get_num_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Borrowed view of the full data array.
    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Owned copy of the full data array.
    pub fn get_all_data(&self) -> Array2<f64> {
        self.data.clone()
    }

    /// Returns the sample at `row` as an owned vector.
    pub fn get_sample(&self, row: usize) -> Result<Array1<f64>> {
        self.check_row(row)?;
        Ok(self.data.row(row).to_owned())
    }

    /// Column indices of `headers`, in the order given.
    pub fn get_header_indices<S: AsRef<str>>(&self, headers: &[S]) -> Result<Vec<usize>> {
        headers
            .iter()
            .map(|h| {
                let h = h.as_ref();
                self.header2col
                    .get(h)
                    .copied()
                    .ok_or_else(|| TransformError::unknown_header(h))
            })
            .collect()
    }

    /// First `n` samples (fewer if the dataset is smaller).
    pub fn head(&self, n: usize) -> Array2<f64> {
        let n = n.min(self.get_num_samples());
        self.data.slice(s![..n, ..]).to_owned()
    }

    /// Last `n` samples (fewer if the dataset is smaller).
    pub fn tail(&self, n: usize) -> Array2<f64> {
        let start = self.get_num_samples().saturating_sub(n);
        self.data.slice(s![start.., ..]).to_owned()
    }

    /// Selects the columns named by `headers`, in that order, for every sample.
    ///
    /// # Errors
    /// `EmptySelection` for an empty header list, `UnknownHeader` for a missing name.
    pub fn select_data<S: AsRef<str>>(&self, headers: &[S]) -> Result<Array2<f64>> {
        if headers.is_empty() {
            return Err(TransformError::EmptySelection);
        }
        let cols = self.get_header_indices(headers)?;
        Ok(self.data.select(Axis(1), &cols))
    }

    /// Selects the columns named by `headers` for the given `rows`, both in the order given.
    pub fn select_rows<S: AsRef<str>>(&self, headers: &[S], rows: &[usize]) -> Result<Array2<f64>> {
        for &row in rows {
            self.check_row(row)?;
        }
        Ok(self.select_data(headers)?.select(Axis(0), rows))
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.get_num_samples() {
            return Err(TransformError::RowOutOfBounds {
                index: row,
                num_samples: self.get_num_samples(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dataset ({}x{})",
            self.get_num_samples(),
            self.get_num_dims()
        )?;
        writeln!(f, "{}", self.headers.join("\t"))?;
        for row in self.data.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.2}", v)).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}
