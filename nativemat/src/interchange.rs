/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_linalg::{self as linalg, Transpose};
use nativemat_utils::views::{MatrixView, MutMatrixView};

use crate::{
    error::{MatrixError, MatrixResult},
    matrix::NativeMatrix,
    region::Shape,
};

/// Exchange with row-major buffers owned by the caller.
impl NativeMatrix {
    /// Resize `self` to the shape of `src` and copy it in.
    pub fn set_row_major(&mut self, src: MatrixView<'_, f64>) {
        self.resize(src.nrows(), src.ncols());
        self.copy_from_row_major(src);
    }

    /// Copy `self` into `dst`, which must have exactly the shape of `self`.
    pub fn get_row_major(&self, dst: MutMatrixView<'_, f64>) -> MatrixResult<()> {
        let dst_shape = Shape::new(dst.nrows(), dst.ncols());
        if dst_shape != self.shape() {
            return Err(MatrixError::incompatible("get", self.shape(), dst_shape));
        }
        linalg::copy(Transpose::Ordinary, self.as_view(), dst.into());
        Ok(())
    }
}
