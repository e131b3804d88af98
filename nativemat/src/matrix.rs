/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt;

use nativemat_linalg::Transpose;
use nativemat_utils::{
    strided::{MutStridedView, StridedView},
    views::MatrixView,
};

use crate::{
    error::{MatrixError, MatrixResult},
    region::Shape,
    storage::Storage,
};

/// A resizable dense matrix of doubles stored in column-major order.
///
/// Operations validate their operands before touching the receiver and report a
/// [`MatrixError`] without mutating anything when validation fails. Receivers are resized
/// as needed, and resizing reuses the reserved buffer whenever the new shape fits.
///
/// ```
/// use nativemat::NativeMatrix;
/// use nativemat_utils::views::MatrixView;
///
/// let a = NativeMatrix::from_row_major(
///     MatrixView::try_from([1.0, 2.0, 3.0, 4.0].as_slice(), 2, 2).unwrap(),
/// );
/// let b = NativeMatrix::identity(2);
///
/// let mut c = NativeMatrix::new(0, 0);
/// c.mult(&a, &b).unwrap();
/// assert!(c.is_approx(&a, 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct NativeMatrix {
    pub(crate) storage: Storage,
}

impl NativeMatrix {
    /// Construct a zero-filled `nrows x ncols` matrix with exactly enough capacity.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            storage: Storage::zeros(nrows, ncols),
        }
    }

    /// Like [`new`](Self::new), but reports [`MatrixError::Allocation`] instead of aborting
    /// when the shape cannot be allocated.
    pub fn try_new(nrows: usize, ncols: usize) -> MatrixResult<Self> {
        Ok(Self {
            storage: Storage::try_zeros(nrows, ncols)?,
        })
    }

    /// Construct the `dim x dim` identity matrix.
    pub fn identity(dim: usize) -> Self {
        let mut matrix = Self::new(dim, dim);
        for i in 0..dim {
            matrix.storage.as_mut_slice()[i * dim + i] = 1.0;
        }
        matrix
    }

    /// Construct a matrix holding a copy of the row-major `source`.
    pub fn from_row_major(source: MatrixView<'_, f64>) -> Self {
        let mut matrix = Self::new(source.nrows(), source.ncols());
        matrix.copy_from_row_major(source);
        matrix
    }

    pub fn nrows(&self) -> usize {
        self.storage.shape().nrows
    }

    pub fn ncols(&self) -> usize {
        self.storage.shape().ncols
    }

    pub fn shape(&self) -> Shape {
        self.storage.shape()
    }

    /// The number of elements reserved in the backing buffer. Always at least
    /// `nrows() * ncols()`.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The address of the backing buffer. It changes only when a resize has to grow the
    /// buffer.
    pub fn as_ptr(&self) -> *const f64 {
        self.storage.as_ptr()
    }

    /// The logical contents in column-major order.
    pub fn as_slice(&self) -> &[f64] {
        self.storage.as_slice()
    }

    pub fn as_view(&self) -> StridedView<'_, f64> {
        self.storage.view()
    }

    pub fn as_mut_view(&mut self) -> MutStridedView<'_, f64> {
        self.storage.view_mut()
    }

    /// Set the logical shape to `nrows x ncols`.
    ///
    /// The buffer is reallocated, to exactly `nrows * ncols` elements, only if the current
    /// capacity is too small. The contents after a resize are unspecified: operations that
    /// resize their receiver overwrite all of it. A grown buffer currently reads as zeros,
    /// but callers must not rely on that.
    pub fn resize(&mut self, nrows: usize, ncols: usize) {
        self.storage.resize(nrows, ncols)
    }

    /// Like [`resize`](Self::resize), but reports [`MatrixError::Allocation`] and leaves
    /// `self` unchanged when a grown buffer cannot be allocated.
    pub fn try_resize(&mut self, nrows: usize, ncols: usize) -> MatrixResult<()> {
        self.storage.try_resize(nrows, ncols)
    }

    /// Set every element of the logical extent to zero.
    pub fn zero(&mut self) {
        self.storage.as_mut_slice().fill(0.0)
    }

    /// Set every element of the logical extent to `value`.
    pub fn fill(&mut self, value: f64) {
        self.storage.as_mut_slice().fill(value)
    }

    pub fn contains_nan(&self) -> bool {
        self.storage.as_slice().iter().any(|x| x.is_nan())
    }

    /// Return whether `self` and `other` have the same shape and
    /// `||self - other|| <= precision * min(||self||, ||other||)` in the Frobenius norm.
    pub fn is_approx(&self, other: &NativeMatrix, precision: f64) -> bool {
        self.shape() == other.shape()
            && nativemat_linalg::is_approx(self.as_view(), other.as_view(), precision)
    }

    /// Return the element at `(row, col)`.
    pub fn element(&self, row: usize, col: usize) -> MatrixResult<f64> {
        let offset = self.offset(row, col)?;
        Ok(self.storage.as_slice()[offset])
    }

    /// Overwrite the element at `(row, col)`.
    pub fn set_element(&mut self, row: usize, col: usize, value: f64) -> MatrixResult<()> {
        let offset = self.offset(row, col)?;
        self.storage.as_mut_slice()[offset] = value;
        Ok(())
    }

    fn offset(&self, row: usize, col: usize) -> MatrixResult<usize> {
        let shape = self.shape();
        if row < shape.nrows && col < shape.ncols {
            Ok(col * shape.nrows + row)
        } else {
            Err(MatrixError::IndexOutOfBounds { row, col, shape })
        }
    }

    /// Remove row `row`, shifting the remaining data in place. The capacity is unchanged.
    ///
    /// Removing the only row leaves a `0 x ncols` matrix.
    pub fn remove_row(&mut self, row: usize) -> MatrixResult<()> {
        let shape = self.shape();
        if row >= shape.nrows {
            return Err(MatrixError::RowOutOfBounds { row, shape });
        }
        self.storage.remove_row(row);
        Ok(())
    }

    /// Remove column `col`, shifting the remaining data in place. The capacity is
    /// unchanged.
    ///
    /// Removing the only column leaves an `nrows x 0` matrix.
    pub fn remove_column(&mut self, col: usize) -> MatrixResult<()> {
        let shape = self.shape();
        if col >= shape.ncols {
            return Err(MatrixError::ColumnOutOfBounds { col, shape });
        }
        self.storage.remove_column(col);
        Ok(())
    }

    /// Write the matrix to standard output, one row per line.
    pub fn print(&self) {
        println!("{}", self);
    }

    /// Copy a row-major source of the same shape as `self` into the storage.
    pub(crate) fn copy_from_row_major(&mut self, source: MatrixView<'_, f64>) {
        // A row-major buffer is the column-major layout of its transpose.
        nativemat_linalg::copy(Transpose::Ordinary, source.into(), self.as_mut_view());
    }
}

impl fmt::Display for NativeMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.as_view();
        let cells: Vec<String> = (0..view.nrows())
            .flat_map(|row| (0..view.ncols()).map(move |col| (row, col)))
            .map(|(row, col)| view[(row, col)].to_string())
            .collect();
        let width = cells.iter().map(String::len).max().unwrap_or(0);

        for (i, row) in cells.chunks(view.ncols().max(1)).enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j != 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", cell, width = width)?;
            }
        }
        Ok(())
    }
}
