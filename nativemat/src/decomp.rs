/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_linalg as linalg;

use crate::{
    defaults::NOT_A_NUMBER,
    error::{MatrixError, MatrixResult},
    matrix::NativeMatrix,
};

fn check_square(operation: &'static str, a: &NativeMatrix) -> MatrixResult<()> {
    if a.shape().is_square() {
        Ok(())
    } else {
        Err(MatrixError::NotSquare {
            operation,
            shape: a.shape(),
        })
    }
}

// `a` must be square and `b` a single column with as many rows as `a`.
fn check_system(operation: &'static str, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
    check_square(operation, a)?;
    if b.ncols() != 1 {
        return Err(MatrixError::NotColumn {
            operation,
            shape: b.shape(),
        });
    }
    if a.nrows() != b.nrows() {
        return Err(MatrixError::incompatible(operation, a.shape(), b.shape()));
    }
    Ok(())
}

impl NativeMatrix {
    /// `self = a^-1` through an LU factorization with partial pivoting.
    ///
    /// Singularity is not detected: for a singular `a` this still succeeds and `self`
    /// holds whatever the factorization produced, typically non-finite values.
    pub fn invert(&mut self, a: &NativeMatrix) -> MatrixResult<()> {
        check_square("invert", a)?;
        self.resize(a.nrows(), a.ncols());
        linalg::lu_inverse(a.as_view(), self.as_mut_view());
        Ok(())
    }

    /// Solve `a * self = b` for a square `a` and single column `b` through an LU
    /// factorization with partial pivoting.
    ///
    /// Like [`invert`](Self::invert), a singular `a` is not detected. Use
    /// [`solve_check`](Self::solve_check) when that is a possibility.
    pub fn solve(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        check_system("solve", a, b)?;
        self.resize(a.ncols(), 1);
        linalg::lu_solve(a.as_view(), b.as_view(), self.as_mut_view());
        Ok(())
    }

    /// Solve `a * self = b` through a rank-revealing LU factorization with full pivoting.
    ///
    /// If `a` is singular, every element of `self` (already resized to `a.ncols() x 1`) is
    /// set to [`NOT_A_NUMBER`] and [`MatrixError::Singular`] is returned. This is the only
    /// operation that writes its receiver on failure.
    pub fn solve_check(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        check_system("solve_check", a, b)?;
        self.resize(a.ncols(), 1);
        linalg::full_piv_lu_solve(a.as_view(), b.as_view(), self.as_mut_view()).map_err(|err| {
            self.fill(NOT_A_NUMBER);
            err.into()
        })
    }
}
