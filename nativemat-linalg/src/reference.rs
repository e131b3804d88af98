/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_utils::strided::{MutStridedView, StridedView};
use thiserror::Error;

use super::common::Transpose;

/// Computes a matrix-matrix product with general column-major matrices one entry at a
/// time.
pub(super) fn gemm_impl(
    atranspose: Transpose,
    btranspose: Transpose,
    alpha: f64,
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    beta: Option<f64>,
    mut c: MutStridedView<'_, f64>,
) {
    let beta: f64 = beta.unwrap_or(0.0);
    let (m, k) = atranspose.shape(a.nrows(), a.ncols());
    let n = c.ncols();

    for i in 0..m {
        for j in 0..n {
            let mut temp = 0.0;
            for l in 0..k {
                let a_val = match atranspose {
                    Transpose::None => a[(i, l)],
                    Transpose::Ordinary => a[(l, i)],
                };
                let b_val = match btranspose {
                    Transpose::None => b[(l, j)],
                    Transpose::Ordinary => b[(j, l)],
                };
                temp += a_val * b_val;
            }
            // Skip reading `c` when it is to be overwritten so stale NaNs do not leak.
            c[(i, j)] = if beta == 0.0 {
                alpha * temp
            } else {
                alpha * temp + beta * c[(i, j)]
            };
        }
    }
}

/// Invert a square column-major matrix with Gauss-Jordan elimination and partial
/// pivoting, returning `None` if a zero pivot is encountered.
pub(super) fn inverse_impl(a: StridedView<'_, f64>) -> Option<Vec<f64>> {
    let n = a.nrows();
    assert_eq!(n, a.ncols());

    // Work on the augmented matrix `[a | I]` in row-major order.
    let width = 2 * n;
    let mut work = vec![0.0; n * width];
    for i in 0..n {
        for j in 0..n {
            work[i * width + j] = a[(i, j)];
        }
        work[i * width + n + i] = 1.0;
    }

    for col in 0..n {
        let pivot = (col..n).max_by(|&x, &y| {
            work[x * width + col]
                .abs()
                .total_cmp(&work[y * width + col].abs())
        })?;
        if work[pivot * width + col] == 0.0 {
            return None;
        }
        for j in 0..width {
            work.swap(col * width + j, pivot * width + j);
        }

        let scale = work[col * width + col];
        for j in 0..width {
            work[col * width + j] /= scale;
        }

        for row in (0..n).filter(|&row| row != col) {
            let factor = work[row * width + col];
            for j in 0..width {
                work[row * width + j] -= factor * work[col * width + j];
            }
        }
    }

    // Read the right half back out in column-major order.
    let mut inverse = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            inverse[j * n + i] = work[i * width + n + j];
        }
    }
    Some(inverse)
}

/// Convert a dense row-major buffer into column-major order.
pub(crate) fn column_major(row_major: &[f64], nrows: usize, ncols: usize) -> Vec<f64> {
    assert_eq!(row_major.len(), nrows * ncols);
    let mut output = vec![0.0; row_major.len()];
    for i in 0..nrows {
        for j in 0..ncols {
            output[j * nrows + i] = row_major[i * ncols + j];
        }
    }
    output
}

/// A test-problem for GEMM.
///
/// All buffers are stored densely in column-major order. The shapes of `a` and `b` are
/// the shapes of the stored operands, before any transposition is applied.
#[derive(Debug)]
pub(crate) struct TestProblem {
    atranspose: Transpose,
    btranspose: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: Vec<f64>,
    b: Vec<f64>,
    beta: Option<f64>,
    c: Vec<f64>,
    expected: Vec<f64>,
}

#[derive(Debug, Error)]
#[error("mismatch in test problem. got {:?}, expected {:?}", got, expected)]
pub(crate) struct ReferenceError {
    got: Vec<f64>,
    expected: Vec<f64>,
}

pub(crate) trait GemmFunction:
    Fn(
    Transpose,
    Transpose,
    f64,
    StridedView<'_, f64>,
    StridedView<'_, f64>,
    Option<f64>,
    MutStridedView<'_, f64>,
)
{
}
impl<F> GemmFunction for F where
    F: Fn(
        Transpose,
        Transpose,
        f64,
        StridedView<'_, f64>,
        StridedView<'_, f64>,
        Option<f64>,
        MutStridedView<'_, f64>,
    )
{
}

impl TestProblem {
    // We're in a world with too many arguments unfortunately.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        atranspose: Transpose,
        btranspose: Transpose,
        m: usize,
        n: usize,
        k: usize,
        alpha: f64,
        a: Vec<f64>,
        b: Vec<f64>,
        beta: Option<f64>,
        c: Vec<f64>,
        expected: Vec<f64>,
    ) -> Self {
        assert_eq!(a.len(), m * k);
        assert_eq!(b.len(), n * k);
        assert_eq!(c.len(), m * n);
        assert_eq!(expected.len(), m * n);
        Self {
            atranspose,
            btranspose,
            m,
            n,
            k,
            alpha,
            a,
            b,
            beta,
            c,
            expected,
        }
    }

    pub(crate) fn check<F: GemmFunction>(&self, f: F) -> Result<(), ReferenceError> {
        let (arows, acols) = self.atranspose.shape(self.m, self.k);
        let (brows, bcols) = self.btranspose.shape(self.k, self.n);

        let a = StridedView::try_from(self.a.as_slice(), arows, acols, arows).unwrap();
        let b = StridedView::try_from(self.b.as_slice(), brows, bcols, brows).unwrap();

        let mut result = self.c.clone();
        let c =
            MutStridedView::try_from(result.as_mut_slice(), self.m, self.n, self.m).unwrap();

        f(
            self.atranspose,
            self.btranspose,
            self.alpha,
            a,
            b,
            self.beta,
            c,
        );

        if result == self.expected {
            Ok(())
        } else {
            Err(ReferenceError {
                got: result,
                expected: self.expected.clone(),
            })
        }
    }
}

/// Return a basic set of test-problems to check that a GEMM implementation passes a rough
/// sanity check of the API.
pub(crate) fn test_gemm_problems() -> Vec<TestProblem> {
    let m = 2;
    let n = 3;
    let k = 4;

    // Matrix A:
    //  7  1  6  8
    //  6  2  6  1
    let a_rows = [7.0, 1.0, 6.0, 8.0, 6.0, 2.0, 6.0, 1.0];
    let a = column_major(&a_rows, m, k);
    // The column-major layout of `A'` is the row-major layout of `A`.
    let at = a_rows.to_vec();

    // Matrix B:
    //  1  9  6
    //  8  7  5
    //  6  4  3
    //  4  7  6
    let b_rows = [1.0, 9.0, 6.0, 8.0, 7.0, 5.0, 6.0, 4.0, 3.0, 4.0, 7.0, 6.0];
    let b = column_major(&b_rows, k, n);
    let bt = b_rows.to_vec();

    // Matrix C:
    //  3  3  3
    //  0  1  9
    let c = column_major(&[3.0, 3.0, 3.0, 0.0, 1.0, 9.0], m, n);

    let expected = |rows: [f64; 6]| column_major(&rows, m, n);

    // None * C + 1 * A * B
    let none_1ab = expected([83.0, 150.0, 113.0, 62.0, 99.0, 70.0]);
    // None * C + 2 * A * B
    let none_2ab = expected([166.0, 300.0, 226.0, 124.0, 198.0, 140.0]);

    // 2 * C + 1 * A * B
    let c2_1ab = expected([89.0, 156.0, 119.0, 62.0, 101.0, 88.0]);
    // 2 * C + 2 * A * B
    let c2_2ab = expected([172.0, 306.0, 232.0, 124.0, 200.0, 158.0]);

    // 1 * C + 1 * A * B
    let c1_1ab = expected([86.0, 153.0, 116.0, 62.0, 100.0, 79.0]);
    // 1 * C + 2 * A * B
    let c1_2ab = expected([169.0, 303.0, 229.0, 124.0, 199.0, 149.0]);

    let mut problems = Vec::new();
    let make_problem = |atranspose: Transpose,
                        btranspose: Transpose,
                        alpha: f64,
                        beta: Option<f64>,
                        expected: Vec<f64>| {
        let a_ = atranspose.call(|| a.clone(), || at.clone());
        let b_ = btranspose.call(|| b.clone(), || bt.clone());
        TestProblem::new(
            atranspose,
            btranspose,
            m,
            n,
            k,
            alpha,
            a_,
            b_,
            beta,
            c.clone(),
            expected,
        )
    };

    let mut on_transpose_combinations = |alpha: f64, beta: Option<f64>, expected: Vec<f64>| {
        for atranspose in [Transpose::None, Transpose::Ordinary] {
            for btranspose in [Transpose::None, Transpose::Ordinary] {
                problems.push(make_problem(
                    atranspose,
                    btranspose,
                    alpha,
                    beta,
                    expected.clone(),
                ));
            }
        }
    };

    on_transpose_combinations(1.0, None, none_1ab.clone());
    on_transpose_combinations(2.0, None, none_2ab.clone());

    on_transpose_combinations(1.0, Some(0.0), none_1ab);
    on_transpose_combinations(2.0, Some(0.0), none_2ab);

    on_transpose_combinations(1.0, Some(2.0), c2_1ab);
    on_transpose_combinations(2.0, Some(2.0), c2_2ab);

    on_transpose_combinations(1.0, Some(1.0), c1_1ab);
    on_transpose_combinations(2.0, Some(1.0), c1_2ab);

    assert_eq!(problems.len(), 32);
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_implementation() {
        let problems = test_gemm_problems();
        for (i, problem) in problems.iter().enumerate() {
            let result = problem.check(gemm_impl);
            if let Err(err) = result {
                panic!("{} on iteration {}. Problem: {:?}", err, i, problem);
            }
        }
    }

    #[test]
    fn test_reference_inverse() {
        // [[4, 7], [2, 6]] has inverse [[0.6, -0.7], [-0.2, 0.4]].
        let a = column_major(&[4.0, 7.0, 2.0, 6.0], 2, 2);
        let view = StridedView::try_from(a.as_slice(), 2, 2, 2).unwrap();
        let inverse = inverse_impl(view).unwrap();
        let expected = column_major(&[0.6, -0.7, -0.2, 0.4], 2, 2);
        for (got, expected) in inverse.iter().zip(expected.iter()) {
            assert!((got - expected).abs() < 1e-12, "{} vs {}", got, expected);
        }

        let singular = column_major(&[1.0, 2.0, 2.0, 4.0], 2, 2);
        let view = StridedView::try_from(singular.as_slice(), 2, 2, 2).unwrap();
        assert!(inverse_impl(view).is_none());
    }
}
