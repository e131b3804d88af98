/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use faer::{
    linalg::solvers::{DenseSolveCore, Solve},
    mat::{MatMut, MatRef},
    unzip, zip, Accum, Par,
};
use nativemat_utils::strided::{MutStridedView, StridedView};

use super::{common::Transpose, SingularMatrix};

fn mat_ref(view: StridedView<'_, f64>) -> MatRef<'_, f64> {
    let nrows = view.nrows();
    let ncols = view.ncols();
    let col_stride = view.col_stride();
    MatRef::from_column_major_slice_with_stride(view.into_inner(), nrows, ncols, col_stride)
}

fn mat_mut(view: MutStridedView<'_, f64>) -> MatMut<'_, f64> {
    let nrows = view.nrows();
    let ncols = view.ncols();
    let col_stride = view.col_stride();
    MatMut::from_column_major_slice_with_stride_mut(view.into_inner(), nrows, ncols, col_stride)
}

fn parallelism() -> Par {
    #[cfg(feature = "rayon")]
    {
        Par::rayon(0)
    }
    #[cfg(not(feature = "rayon"))]
    {
        Par::Seq
    }
}

/// See the documentation for `gemm`.
///
/// The implementation may assume the specified invariants hold for the shapes of the
/// operands.
pub(super) fn gemm_impl(
    atranspose: Transpose,
    btranspose: Transpose,
    alpha: f64,
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    beta: Option<f64>,
    c: MutStridedView<'_, f64>,
) {
    let a = atranspose.call(|| mat_ref(a), || mat_ref(a).transpose());
    let b = btranspose.call(|| mat_ref(b), || mat_ref(b).transpose());
    let mut c = mat_mut(c);

    // Faer only accumulates with unit weight, so any other `beta` is applied up front.
    let beta = match beta {
        Some(scale) => {
            if scale != 1.0 {
                c *= faer::Scale(scale);
            }
            Accum::Add
        }
        None => Accum::Replace,
    };

    faer::linalg::matmul::matmul(c, beta, a, b, alpha, parallelism())
}

pub(super) fn copy_impl(
    transpose: Transpose,
    src: StridedView<'_, f64>,
    dst: MutStridedView<'_, f64>,
) {
    let src = transpose.call(|| mat_ref(src), || mat_ref(src).transpose());
    mat_mut(dst).copy_from(src);
}

pub(super) fn axpy_impl(alpha: f64, src: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    zip!(mat_mut(dst), mat_ref(src)).for_each(|unzip!(d, s)| *d += alpha * *s);
}

pub(super) fn add_impl(
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    dst: MutStridedView<'_, f64>,
) {
    zip!(mat_mut(dst), mat_ref(a), mat_ref(b)).for_each(|unzip!(d, a, b)| *d = *a + *b);
}

pub(super) fn sub_impl(
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    dst: MutStridedView<'_, f64>,
) {
    zip!(mat_mut(dst), mat_ref(a), mat_ref(b)).for_each(|unzip!(d, a, b)| *d = *a - *b);
}

pub(super) fn scale_impl(alpha: f64, src: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    zip!(mat_mut(dst), mat_ref(src)).for_each(|unzip!(d, s)| *d = alpha * *s);
}

pub(super) fn lu_inverse_impl(a: StridedView<'_, f64>, dst: MutStridedView<'_, f64>) {
    if a.nrows() == 0 {
        return;
    }
    let inverse = mat_ref(a).partial_piv_lu().inverse();
    mat_mut(dst).copy_from(inverse.as_ref());
}

pub(super) fn lu_solve_impl(
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    x: MutStridedView<'_, f64>,
) {
    if a.nrows() == 0 {
        return;
    }
    let solution = mat_ref(a).partial_piv_lu().solve(mat_ref(b));
    mat_mut(x).copy_from(solution.as_ref());
}

pub(super) fn full_piv_lu_solve_impl(
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    x: MutStridedView<'_, f64>,
) -> Result<(), SingularMatrix> {
    let dim = a.nrows();
    if dim == 0 {
        return Ok(());
    }

    let lu = mat_ref(a).full_piv_lu();
    if !has_full_rank(lu.U()) {
        return Err(SingularMatrix { dim });
    }

    let solution = lu.solve(mat_ref(b));
    mat_mut(x).copy_from(solution.as_ref());
    Ok(())
}

// Full pivoting places the largest remaining magnitude on the diagonal at every step, so
// the rank is the number of pivots that are not negligible relative to the first one.
fn has_full_rank(u: MatRef<'_, f64>) -> bool {
    let dim = u.nrows().min(u.ncols());
    let max_pivot = (0..dim).map(|i| u[(i, i)].abs()).fold(0.0, f64::max);
    let threshold = f64::EPSILON * (dim as f64) * max_pivot;
    (0..dim).all(|i| u[(i, i)].abs() > threshold)
}

pub(super) fn is_approx_impl(
    a: StridedView<'_, f64>,
    b: StridedView<'_, f64>,
    precision: f64,
) -> bool {
    let a = mat_ref(a);
    let b = mat_ref(b);

    let mut diff = 0.0;
    zip!(a, b).for_each(|unzip!(x, y)| {
        let d = *x - *y;
        diff += d * d;
    });

    diff <= precision * precision * a.squared_norm_l2().min(b.squared_norm_l2())
}

#[cfg(all(test, feature = "rayon"))]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{distr::Distribution, rngs::StdRng, SeedableRng};
    use rand_distr::StandardNormal;

    use super::*;
    use crate::reference;

    fn view(data: &[f64], nrows: usize, ncols: usize) -> StridedView<'_, f64> {
        StridedView::try_from(data, nrows, ncols, nrows).unwrap()
    }

    #[test]
    fn test_parallel_gemm() {
        assert!(matches!(parallelism(), Par::Rayon(_)));

        let mut rng = StdRng::seed_from_u64(0x9a7a_11e1);
        let (m, n, k) = (96, 80, 112);
        let mut sample = |len: usize| -> Vec<f64> {
            (0..len).map(|_| StandardNormal.sample(&mut rng)).collect()
        };
        let a = sample(m * k);
        let b = sample(n * k);
        let c = sample(m * n);

        let mut got = c.clone();
        gemm_impl(
            Transpose::None,
            Transpose::Ordinary,
            0.5,
            view(&a, m, k),
            view(&b, n, k),
            Some(2.0),
            MutStridedView::try_from(got.as_mut_slice(), m, n, m).unwrap(),
        );

        let mut expected = c;
        reference::gemm_impl(
            Transpose::None,
            Transpose::Ordinary,
            0.5,
            view(&a, m, k),
            view(&b, n, k),
            Some(2.0),
            MutStridedView::try_from(expected.as_mut_slice(), m, n, m).unwrap(),
        );

        for (g, e) in got.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(g, e, epsilon = 1e-10);
        }
    }
}
