/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_utils::strided::{MutStridedView, StridedView};
use tracing::trace;

use crate::{
    error::{MatrixError, MatrixResult},
    region::Shape,
};

/// Allocate `nrows * ncols` elements, reporting a shape that cannot be allocated as an
/// error instead of aborting.
fn try_allocate(nrows: usize, ncols: usize) -> MatrixResult<Box<[f64]>> {
    let failed = || MatrixError::Allocation {
        shape: Shape::new(nrows, ncols),
    };
    let len = nrows.checked_mul(ncols).ok_or_else(failed)?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| failed())?;
    data.resize(len, 0.0);
    Ok(data.into_boxed_slice())
}

/// A reserved buffer of doubles with a column-major logical view over its prefix.
///
/// ```text
///   data: | c0 c0 c0 | c1 c1 c1 | c2 c2 c2 | ...... spare capacity ...... |
///         |<-nrows ->|
///         |<------- nrows * ncols -------->|
///         |<------------------------ capacity ------------------------->|
/// ```
///
/// The buffer only grows, and only when a resize needs more elements than are reserved.
/// Contents outside the logical extent, and contents after any resize, are unspecified.
#[derive(Debug)]
pub(crate) struct Storage {
    data: Box<[f64]>,
    nrows: usize,
    ncols: usize,
}

impl Storage {
    /// Allocate exactly `nrows * ncols` zeroed elements.
    pub(crate) fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols].into_boxed_slice(),
            nrows,
            ncols,
        }
    }

    /// Like [`zeros`](Self::zeros), but fails instead of aborting when the shape cannot be
    /// allocated.
    pub(crate) fn try_zeros(nrows: usize, ncols: usize) -> MatrixResult<Self> {
        Ok(Self {
            data: try_allocate(nrows, ncols)?,
            nrows,
            ncols,
        })
    }

    /// Take ownership of a dense column-major buffer. The capacity is `data.len()`.
    pub(crate) fn from_column_major(data: Box<[f64]>, nrows: usize, ncols: usize) -> Self {
        debug_assert_eq!(data.len(), nrows * ncols);
        Self { data, nrows, ncols }
    }

    pub(crate) fn shape(&self) -> Shape {
        Shape::new(self.nrows, self.ncols)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn as_ptr(&self) -> *const f64 {
        self.data.as_ptr()
    }

    /// The logical extent of the buffer in column-major order.
    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.data[..self.nrows * self.ncols]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        let len = self.nrows * self.ncols;
        &mut self.data[..len]
    }

    pub(crate) fn view(&self) -> StridedView<'_, f64> {
        StridedView::dense(self.as_slice(), self.nrows, self.ncols)
    }

    pub(crate) fn view_mut(&mut self) -> MutStridedView<'_, f64> {
        let (nrows, ncols) = (self.nrows, self.ncols);
        MutStridedView::dense(self.as_mut_slice(), nrows, ncols)
    }

    /// Change the logical shape, reallocating only if the new shape needs more elements
    /// than are currently reserved.
    ///
    /// A reallocation discards the previous contents. The fresh buffer happens to be
    /// zeroed, but callers must not rely on that: every operation that resizes its receiver
    /// overwrites the whole logical extent.
    pub(crate) fn resize(&mut self, nrows: usize, ncols: usize) {
        if let Some(required) = self.growth(nrows, ncols) {
            self.data = vec![0.0; required].into_boxed_slice();
        }
        self.nrows = nrows;
        self.ncols = ncols;
    }

    /// Like [`resize`](Self::resize), but leaves `self` untouched and fails when the new
    /// buffer cannot be allocated.
    pub(crate) fn try_resize(&mut self, nrows: usize, ncols: usize) -> MatrixResult<()> {
        if self.growth(nrows, ncols).is_some() {
            self.data = try_allocate(nrows, ncols)?;
        }
        self.nrows = nrows;
        self.ncols = ncols;
        Ok(())
    }

    // Return the element count to allocate if `nrows x ncols` does not fit the capacity.
    fn growth(&self, nrows: usize, ncols: usize) -> Option<usize> {
        let required = nrows.saturating_mul(ncols);
        if required <= self.data.len() {
            return None;
        }
        trace!(
            old_capacity = self.data.len(),
            new_capacity = required,
            "growing matrix storage"
        );
        Some(required)
    }

    /// Remove row `row` in place.
    ///
    /// Removing a row shrinks the column stride by one, so every column after the first
    /// moves toward the front of the buffer. Column `c` is rebuilt with one forward move
    /// of `nrows - 1` elements that reads from the old stride and writes with the new one:
    /// the tail of column `c` below `row` followed by the head of column `c + 1` above
    /// `row`.
    ///
    /// ```text
    ///   old (3x2):  a0 a1 a2 | b0 b1 b2        remove row 1
    ///   new (2x2):  a0 a2 | b0 b2
    ///                  ^^^^^^^ moved as one run, then the last column's tail
    /// ```
    ///
    /// Each destination range ends before the next source range begins, so processing
    /// columns in increasing order never overwrites data that is still to be read.
    pub(crate) fn remove_row(&mut self, row: usize) {
        debug_assert!(row < self.nrows);
        let old_rows = self.nrows;
        let new_rows = old_rows - 1;

        for col in 0..self.ncols {
            let src = col * old_rows + row + 1;
            // The last column has nothing after it to pull up.
            let len = if col + 1 == self.ncols {
                new_rows - row
            } else {
                new_rows
            };
            self.data.copy_within(src..src + len, col * new_rows + row);
        }

        self.nrows = new_rows;
    }

    /// Remove column `col` in place by shifting every later column left by one stride.
    pub(crate) fn remove_column(&mut self, col: usize) {
        debug_assert!(col < self.ncols);
        let stride = self.nrows;
        let end = self.ncols * stride;
        self.data.copy_within((col + 1) * stride..end, col * stride);
        self.ncols -= 1;
    }
}

impl Clone for Storage {
    /// The clone reserves exactly its logical extent.
    fn clone(&self) -> Self {
        Self::from_column_major(self.as_slice().into(), self.nrows, self.ncols)
    }
}
