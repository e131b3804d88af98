/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_linalg::{self as linalg, Transpose};
use nativemat_utils::{
    strided::{MutStridedView, StridedView},
    views::{MatrixView, MutMatrixView},
};

use crate::{
    arith::check_inner,
    error::{MatrixError, MatrixResult},
    matrix::NativeMatrix,
    region::{Region, Shape},
};

/// Return the region of an `extent` block with top-left corner `(row, col)` if it fits
/// inside `shape`.
fn block_within(row: usize, col: usize, extent: Shape, shape: Shape) -> MatrixResult<Region> {
    let fits = |start: usize, len: usize, bound: usize| {
        start.checked_add(len).is_some_and(|end| end <= bound)
    };
    if fits(row, extent.nrows, shape.nrows) && fits(col, extent.ncols, shape.ncols) {
        Ok(Region::at(row, col, extent.nrows, extent.ncols))
    } else {
        Err(MatrixError::BlockOutOfBounds {
            row,
            col,
            extent,
            shape,
        })
    }
}

/// Block operations. None of these resize the receiver, and no element is written unless
/// every coordinate has been validated.
impl NativeMatrix {
    /// Add `scale` times the `src` block of `a` into the equally sized block of `self` whose
    /// top-left corner is `(dst_row, dst_col)`.
    pub fn add_block(
        &mut self,
        a: &NativeMatrix,
        dst_row: usize,
        dst_col: usize,
        src: Region,
        scale: f64,
    ) -> MatrixResult<()> {
        src.check_within(a.shape())?;
        let dst = block_within(dst_row, dst_col, src.shape(), self.shape())?;

        linalg::axpy(
            scale,
            a.as_view().submatrix(src.rows, src.cols),
            self.as_mut_view().submatrix_mut(dst.rows, dst.cols),
        );
        Ok(())
    }

    /// Accumulate `a * b` into the block of `self` whose top-left corner is
    /// `(row_start, col_start)`.
    pub fn mult_add_block(
        &mut self,
        a: &NativeMatrix,
        b: &NativeMatrix,
        row_start: usize,
        col_start: usize,
    ) -> MatrixResult<()> {
        check_inner("mult_add_block", a.shape(), b.shape())?;
        let extent = Shape::new(a.nrows(), b.ncols());
        let dst = block_within(row_start, col_start, extent, self.shape())?;

        linalg::gemm(
            Transpose::None,
            Transpose::None,
            1.0,
            a.as_view(),
            b.as_view(),
            Some(1.0),
            self.as_mut_view().submatrix_mut(dst.rows, dst.cols),
        );
        Ok(())
    }

    /// Copy the `src_region` block of `src` into `self` at `(dst_row, dst_col)`.
    pub fn insert(
        &mut self,
        src: &NativeMatrix,
        src_region: Region,
        dst_row: usize,
        dst_col: usize,
    ) -> MatrixResult<()> {
        src_region.check_within(src.shape())?;
        let dst = block_within(dst_row, dst_col, src_region.shape(), self.shape())?;

        linalg::copy(
            Transpose::None,
            src.as_view().submatrix(src_region.rows, src_region.cols),
            self.as_mut_view().submatrix_mut(dst.rows, dst.cols),
        );
        Ok(())
    }

    /// Copy all of `src` into `self` at `(dst_row, dst_col)`.
    pub fn insert_matrix(
        &mut self,
        src: &NativeMatrix,
        dst_row: usize,
        dst_col: usize,
    ) -> MatrixResult<()> {
        self.insert(src, Region::full(src.shape()), dst_row, dst_col)
    }

    /// Copy the `src_region` block of the row-major buffer `src` into `self` at
    /// `(dst_row, dst_col)`.
    pub fn insert_row_major(
        &mut self,
        src: MatrixView<'_, f64>,
        src_region: Region,
        dst_row: usize,
        dst_col: usize,
    ) -> MatrixResult<()> {
        src_region.check_within(Shape::new(src.nrows(), src.ncols()))?;
        let dst = block_within(dst_row, dst_col, src_region.shape(), self.shape())?;

        // Rows of the row-major source are columns of its column-major transpose.
        let src: StridedView<'_, f64> = src.into();
        linalg::copy(
            Transpose::Ordinary,
            src.submatrix(src_region.cols, src_region.rows),
            self.as_mut_view().submatrix_mut(dst.rows, dst.cols),
        );
        Ok(())
    }

    /// Copy the `src_region` block of `self` into the row-major buffer `dst` at
    /// `(dst_row, dst_col)`.
    pub fn extract(
        &self,
        src_region: Region,
        dst: MutMatrixView<'_, f64>,
        dst_row: usize,
        dst_col: usize,
    ) -> MatrixResult<()> {
        src_region.check_within(self.shape())?;
        let dst_shape = Shape::new(dst.nrows(), dst.ncols());
        let region = block_within(dst_row, dst_col, src_region.shape(), dst_shape)?;

        let dst: MutStridedView<'_, f64> = dst.into();
        linalg::copy(
            Transpose::Ordinary,
            self.as_view().submatrix(src_region.rows, src_region.cols),
            dst.submatrix_mut(region.cols, region.rows),
        );
        Ok(())
    }
}
