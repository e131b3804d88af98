/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Dense linear-algebra kernels over column-major strided views.
//!
//! Every public function checks the shapes of its operands and panics on a mismatch
//! before forwarding to the backend. Callers that need recoverable errors validate
//! beforehand.

pub mod common;
pub use common::Transpose;

mod faer;
use faer::{
    add_impl, axpy_impl, copy_impl, full_piv_lu_solve_impl, gemm_impl, is_approx_impl,
    lu_inverse_impl, lu_solve_impl, scale_impl, sub_impl,
};
use nativemat_utils::strided::{MutStridedView, StridedView};
use thiserror::Error;

// Make the reference implementation available for internal testing.
#[cfg(test)]
mod reference;

/// Error returned by the rank-revealing solver when the system matrix is singular.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the {dim}x{dim} system matrix is singular")]
pub struct SingularMatrix {
    dim: usize,
}

impl SingularMatrix {
    /// The dimension of the square system matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

fn assert_same_shape(what: &str, expected: (usize, usize), got: (usize, usize)) {
    assert_eq!(
        expected, got,
        "expected {} to have shape {}x{}, instead got {}x{}",
        what, expected.0, expected.1, got.0, got.1
    );
}

fn assert_square(what: &str, nrows: usize, ncols: usize) {
    assert_eq!(
        nrows, ncols,
        "expected {} to be square, instead got {}x{}",
        what, nrows, ncols
    );
}

/// Matrix-matrix multiplication for column-major strided matrices `a`, `b` and `c`.
///
/// Performs one of the following operations:
/// ```ignore
/// 1. c = [beta * c] + alpha * a * b
/// 2. c = [beta * c] + alpha * a' * b
/// 3. c = [beta * c] + alpha * a * b'
/// 4. c = [beta * c] + alpha * a' * b'
/// ```
/// Where `x'` indicates the ordinary transpose of `x`.
///
/// If `beta` is `None`, the destination `c` is completely over-written.
///
/// * `atranspose`: Whether `a` should be interpreted as an in-place transpose.
/// * `btranspose`: Whether `b` should be interpreted as an in-place transpose.
/// * `alpha`: Scaling parameter for the operation `a * b`.
/// * `a`: The matrix `a` with dimension `m x k` (after transposing).
/// * `b`: The matrix `b` with dimension `k x n` (after transposing).
/// * `beta`: Optional scaling parameter for the matrix `c`.
/// * `c`: The output matrix with dimension `m x n`.
///
/// The destination must not overlap either operand.
///
/// # Panics
///
/// Panics if the inner dimensions of `a` and `b` disagree or if `c` is not `m x n`.
pub fn gemm(
    atranspose: Transpose,
    btranspose: Transpose,
    alpha: f64,
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    beta: Option<f64>,
    c: MutStridedView<'_, f64>,
) {
    let (m, ka) = atranspose.shape(a.nrows(), a.ncols());
    let (kb, n) = btranspose.shape(b.nrows(), b.ncols());
    assert_eq!(
        ka, kb,
        "inner dimensions of `a` ({}) and `b` ({}) disagree",
        ka, kb
    );
    assert_same_shape("`c`", (m, n), (c.nrows(), c.ncols()));

    gemm_impl(atranspose, btranspose, alpha, a, b, beta, c)
}

/// Copy `src` (or its transpose) into `dst`.
///
/// # Panics
///
/// Panics if the shape of `dst` differs from the shape of `src` after transposing.
pub fn copy(transpose: Transpose, src: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    assert_same_shape(
        "`dst`",
        transpose.shape(src.nrows(), src.ncols()),
        (dst.nrows(), dst.ncols()),
    );
    copy_impl(transpose, src, dst)
}

/// Compute `dst += alpha * src`.
///
/// # Panics
///
/// Panics if `src` and `dst` have different shapes.
pub fn axpy(alpha: f64, src: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    assert_same_shape(
        "`dst`",
        (src.nrows(), src.ncols()),
        (dst.nrows(), dst.ncols()),
    );
    axpy_impl(alpha, src, dst)
}

/// Compute `dst = a + b`.
///
/// # Panics
///
/// Panics if any of the three operands differ in shape.
pub fn add(a: StridedView<'_, f64>, b: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    assert_same_shape("`b`", (a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    assert_same_shape("`dst`", (a.nrows(), a.ncols()), (dst.nrows(), dst.ncols()));
    add_impl(a, b, dst)
}

/// Compute `dst = a - b`.
///
/// # Panics
///
/// Panics if any of the three operands differ in shape.
pub fn sub(a: StridedView<'_, f64>, b: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    assert_same_shape("`b`", (a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    assert_same_shape("`dst`", (a.nrows(), a.ncols()), (dst.nrows(), dst.ncols()));
    sub_impl(a, b, dst)
}

/// Compute `dst = alpha * src`.
///
/// # Panics
///
/// Panics if `src` and `dst` have different shapes.
pub fn scale(alpha: f64, src: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    assert_same_shape(
        "`dst`",
        (src.nrows(), src.ncols()),
        (dst.nrows(), dst.ncols()),
    );
    scale_impl(alpha, src, dst)
}

/// Write the inverse of the square matrix `a` into `dst` using an LU factorization with
/// partial pivoting.
///
/// Singular inputs are not detected: the result then contains non-finite values.
///
/// # Panics
///
/// Panics if `a` is not square or if `dst` differs from `a` in shape.
pub fn lu_inverse(a: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    assert_square("`a`", a.nrows(), a.ncols());
    assert_same_shape("`dst`", (a.nrows(), a.ncols()), (dst.nrows(), dst.ncols()));
    lu_inverse_impl(a, dst)
}

/// Solve `a * x = b` for `x` using an LU factorization with partial pivoting.
///
/// Singular inputs are not detected.
///
/// # Panics
///
/// Panics if `a` is not square, if `b` does not have as many rows as `a`, or if `x`
/// differs from `b` in shape.
pub fn lu_solve(a: StridedView<'_, f64>, b: StridedView<'_, f64>, x: MutStridedView<'_, f64>) {
    assert_square("`a`", a.nrows(), a.ncols());
    assert_eq!(
        a.nrows(),
        b.nrows(),
        "expected `b` to have {} rows, instead got {}",
        a.nrows(),
        b.nrows()
    );
    assert_same_shape("`x`", (b.nrows(), b.ncols()), (x.nrows(), x.ncols()));
    lu_solve_impl(a, b, x)
}

/// Solve `a * x = b` for `x` using an LU factorization with full pivoting.
///
/// Returns an error and leaves `x` untouched if `a` does not have full rank.
///
/// # Panics
///
/// Panics under the same conditions as [`lu_solve`].
pub fn full_piv_lu_solve(
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    x: MutStridedView<'_, f64>,
) -> Result<(), SingularMatrix> {
    assert_square("`a`", a.nrows(), a.ncols());
    assert_eq!(
        a.nrows(),
        b.nrows(),
        "expected `b` to have {} rows, instead got {}",
        a.nrows(),
        b.nrows()
    );
    assert_same_shape("`x`", (b.nrows(), b.ncols()), (x.nrows(), x.ncols()));
    full_piv_lu_solve_impl(a, b, x)
}

/// Return whether `a` and `b` are equal up to `precision` relative to the smaller of
/// their Frobenius norms:
/// ```text
/// ||a - b|| <= precision * min(||a||, ||b||)
/// ```
///
/// # Panics
///
/// Panics if `a` and `b` have different shapes.
pub fn is_approx(a: StridedView<'_, f64>, b: StridedView<'_, f64>, precision: f64) -> bool {
    assert_same_shape("`b`", (a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    is_approx_impl(a, b, precision)
}
