/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Range},
};
use thiserror::Error;

use crate::views::{self, DenseData, MutDenseData};

/// A column-major strided matrix.
///
/// Element `(row, col)` lives at offset `col * col_stride + row`. When `col_stride` equals
/// `nrows` the view is dense, which is the case for the full logical extent of a native
/// matrix. Sub-blocks of a dense matrix keep the parent's stride.
///
/// ```text
///              col 0  col 1  col 2
///            +---------------------+
///            |  a0  |  b0  |  c0   |   ^
///            |  a1  |  b1  |  c1   | nrows
///            |  a2  |  b2  |  c2   |   v
///            +---------------------+
///               a3     b3     c3       <- skipped, present when col_stride > nrows
///            |<---->|
///           col_stride
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StridedBase<T>
where
    T: DenseData,
{
    data: T,
    nrows: usize,
    ncols: usize,
    // The distance between the starts of two consecutive columns. This must be greater
    // than or equal to `nrows`.
    col_stride: usize,
}

/// Return the linear length of a slice underlying a `StridedBase` with the given parameters.
pub fn linear_length(nrows: usize, ncols: usize, col_stride: usize) -> usize {
    (ncols.max(1) - 1) * col_stride + ncols.min(1) * nrows
}

#[derive(Error)]
#[non_exhaustive]
#[error(
    "tried to construct a strided matrix with {nrows} rows and {ncols} cols and \
     column stride {col_stride} over a slice of length {} (expected {})",
     data.as_slice().len(),
     linear_length(self.nrows, self.ncols, self.col_stride)
)]
pub struct TryFromError<T: DenseData> {
    data: T,
    nrows: usize,
    ncols: usize,
    col_stride: usize,
}

// Manually implement `fmt::Debug` so we don't require `T::Debug`.
impl<T: DenseData> fmt::Debug for TryFromError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFromError")
            .field("data_len", &self.data.as_slice().len())
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .field("col_stride", &self.col_stride)
            .finish()
    }
}

impl<'a, T> StridedBase<&'a [T]> {
    /// Return the sub-block covering `rows` and `cols`, keeping the column stride of
    /// `self`.
    ///
    /// # Panics
    ///
    /// Panics if either range is inverted or extends past the bounds of `self`.
    pub fn submatrix(self, rows: Range<usize>, cols: Range<usize>) -> StridedView<'a, T> {
        let (offset, len) = self.block_extent(&rows, &cols);
        let data = if len == 0 {
            &self.data[..0]
        } else {
            &self.data[offset..offset + len]
        };
        StridedBase {
            data,
            nrows: rows.len(),
            ncols: cols.len(),
            col_stride: self.col_stride,
        }
    }
}

impl<'a, T> StridedBase<&'a mut [T]> {
    /// Return the mutable sub-block covering `rows` and `cols`, keeping the column stride
    /// of `self`.
    ///
    /// # Panics
    ///
    /// Panics if either range is inverted or extends past the bounds of `self`.
    pub fn submatrix_mut(self, rows: Range<usize>, cols: Range<usize>) -> MutStridedView<'a, T> {
        let (offset, len) = self.block_extent(&rows, &cols);
        let Self {
            data, col_stride, ..
        } = self;
        let data = if len == 0 {
            &mut data[..0]
        } else {
            &mut data[offset..offset + len]
        };
        StridedBase {
            data,
            nrows: rows.len(),
            ncols: cols.len(),
            col_stride,
        }
    }
}

impl<T> StridedBase<T>
where
    T: DenseData,
{
    /// Construct a strided view over data slice.
    ///
    /// Returns an error if `data` is not equal to the expected length as determined
    /// by `linear_length`.
    ///
    /// # Panics
    ///
    /// * Panics if `col_stride < nrows`.
    pub fn try_from(
        data: T,
        nrows: usize,
        ncols: usize,
        col_stride: usize,
    ) -> Result<Self, TryFromError<T>> {
        assert!(
            col_stride >= nrows,
            "col_stride must be greater than or equal to nrows"
        );
        // This computation needs to be set up such that:
        // 1. When `ncols == 0`, the expected length is 0.
        // 2. We make a tight upper-bound on the expected length for the last column.
        let required_length = linear_length(nrows, ncols, col_stride);
        if data.as_slice().len() == required_length {
            Ok(Self {
                data,
                nrows,
                ncols,
                col_stride,
            })
        } else {
            Err(TryFromError {
                data,
                nrows,
                ncols,
                col_stride,
            })
        }
    }

    /// Construct a dense view over `data` with `col_stride == nrows`.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not hold exactly `nrows * ncols` elements.
    pub fn dense(data: T, nrows: usize, ncols: usize) -> Self {
        let len = data.as_slice().len();
        assert_eq!(
            Some(len),
            nrows.checked_mul(ncols),
            "a dense {}x{} matrix cannot span {} elements",
            nrows,
            ncols,
            len
        );
        Self {
            data,
            nrows,
            ncols,
            col_stride: nrows,
        }
    }

    /// Return the number of columns in the matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the number of rows in the matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the count of elements between the start of each column.
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    /// Return the underlying data as a slice.
    ///
    /// # Note
    ///
    /// The underlying representation for a strided matrix is not necessarily dense.
    pub fn as_slice(&self) -> &[T::Elem] {
        self.data.as_slice()
    }

    /// Return the underlying data as a mutable slice.
    ///
    /// # Note
    ///
    /// The underlying representation for a strided matrix is not necessarily dense.
    pub fn as_mut_slice(&mut self) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        self.data.as_mut_slice()
    }

    /// Consume the view, returning the inner representation.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to an element without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &T::Elem {
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        // SAFETY: Forwarded to the caller.
        unsafe { self.as_slice().get_unchecked(col * self.col_stride + row) }
    }

    /// Returns a mutable reference to an element without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    pub unsafe fn get_unchecked_mut(&mut self, row: usize, col: usize) -> &mut T::Elem
    where
        T: MutDenseData,
    {
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        let index = col * self.col_stride + row;
        // SAFETY: Forwarded to the caller.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    // Return the offset and the linear length of the block `rows x cols`.
    fn block_extent(&self, rows: &Range<usize>, cols: &Range<usize>) -> (usize, usize) {
        assert!(
            rows.start <= rows.end && rows.end <= self.nrows,
            "row range {rows:?} is out of bounds for a matrix with {} rows",
            self.nrows
        );
        assert!(
            cols.start <= cols.end && cols.end <= self.ncols,
            "column range {cols:?} is out of bounds for a matrix with {} columns",
            self.ncols
        );
        let offset = cols.start * self.col_stride + rows.start;
        let len = if rows.is_empty() || cols.is_empty() {
            0
        } else {
            linear_length(rows.len(), cols.len(), self.col_stride)
        };
        (offset, len)
    }
}

pub type StridedView<'a, T> = StridedBase<&'a [T]>;
pub type MutStridedView<'a, T> = StridedBase<&'a mut [T]>;

/// Return a reference to the item at entry `(row, col)` in the matrix.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> Index<(usize, usize)> for StridedBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.nrows(),
            "row {row} is out of bounds (max: {})",
            self.nrows()
        );
        assert!(
            col < self.ncols(),
            "col {col} is out of bounds (max: {})",
            self.ncols()
        );
        // SAFETY: We have checked that `row` and `col` are in-bounds.
        unsafe { self.get_unchecked(row, col) }
    }
}

/// Return a mutable reference to the item at entry `(row, col)` in the matrix.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> IndexMut<(usize, usize)> for StridedBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            row < self.nrows(),
            "row {row} is out of bounds (max: {})",
            self.nrows()
        );
        assert!(
            col < self.ncols(),
            "col {col} is out of bounds (max: {})",
            self.ncols()
        );
        // SAFETY: We have checked that `row` and `col` are in-bounds.
        unsafe { self.get_unchecked_mut(row, col) }
    }
}

/// Reinterpret a row-major matrix as the column-major view of its **transpose**.
///
/// A row-major `R x C` buffer has the same memory layout as a column-major `C x R` matrix
/// with column stride `C`. Entry `(row, col)` of the source is entry `(col, row)` of the
/// result.
impl<T, U> From<views::MatrixBase<T>> for StridedBase<U>
where
    T: DenseData,
    U: DenseData,
    T: Into<U>,
{
    fn from(matrix: views::MatrixBase<T>) -> Self {
        let nrows = matrix.nrows();
        let ncols = matrix.ncols();
        Self {
            data: matrix.into_inner().into(),
            nrows: ncols,
            ncols: nrows,
            col_stride: ncols,
        }
    }
}
