/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_linalg::{self as linalg, Transpose};
use nativemat_utils::strided::{MutStridedView, StridedView};

use crate::{
    error::{MatrixError, MatrixResult},
    matrix::NativeMatrix,
    region::Shape,
};

fn check_same_shape(
    operation: &'static str,
    a: &NativeMatrix,
    b: &NativeMatrix,
) -> MatrixResult<()> {
    if a.shape() == b.shape() {
        Ok(())
    } else {
        Err(MatrixError::incompatible(operation, a.shape(), b.shape()))
    }
}

/// Check that `lhs * rhs` is defined, with both shapes taken after any transposition.
pub(crate) fn check_inner(operation: &'static str, lhs: Shape, rhs: Shape) -> MatrixResult<()> {
    if lhs.ncols == rhs.nrows {
        Ok(())
    } else {
        Err(MatrixError::incompatible(operation, lhs, rhs))
    }
}

fn check_receiver(operation: &'static str, expected: Shape, found: Shape) -> MatrixResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(MatrixError::ReceiverShape {
            operation,
            expected,
            found,
        })
    }
}

/// Arithmetic. Every binary operation validates both operands before the receiver is
/// resized or written.
impl NativeMatrix {
    /// Make `self` a copy of `a`.
    pub fn set(&mut self, a: &NativeMatrix) {
        self.resize(a.nrows(), a.ncols());
        self.storage.as_mut_slice().copy_from_slice(a.as_slice());
    }

    /// `self = a + b`.
    pub fn add(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        check_same_shape("add", a, b)?;
        self.resize(a.nrows(), a.ncols());
        linalg::add(a.as_view(), b.as_view(), self.as_mut_view());
        Ok(())
    }

    /// `self = a - b`.
    pub fn subtract(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        check_same_shape("subtract", a, b)?;
        self.resize(a.nrows(), a.ncols());
        linalg::sub(a.as_view(), b.as_view(), self.as_mut_view());
        Ok(())
    }

    /// `self = a * b`.
    pub fn mult(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        self.mult_scaled(1.0, a, b)
    }

    /// `self = scale * a * b`.
    pub fn mult_scaled(
        &mut self,
        scale: f64,
        a: &NativeMatrix,
        b: &NativeMatrix,
    ) -> MatrixResult<()> {
        self.product("mult", Transpose::None, Transpose::None, scale, a, b)
    }

    /// `self += a * b`. The receiver must already be `a.nrows() x b.ncols()`.
    pub fn mult_add(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        self.accumulate("mult_add", Transpose::None, Transpose::None, a, b)
    }

    /// `self = a' * b`.
    pub fn mult_trans_a(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        self.product(
            "mult_trans_a",
            Transpose::Ordinary,
            Transpose::None,
            1.0,
            a,
            b,
        )
    }

    /// `self += a' * b`. The receiver must already be `a.ncols() x b.ncols()`.
    pub fn mult_add_trans_a(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        self.accumulate(
            "mult_add_trans_a",
            Transpose::Ordinary,
            Transpose::None,
            a,
            b,
        )
    }

    /// `self = a * b'`.
    pub fn mult_trans_b(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        self.product(
            "mult_trans_b",
            Transpose::None,
            Transpose::Ordinary,
            1.0,
            a,
            b,
        )
    }

    /// `self += a * b'`. The receiver must already be `a.nrows() x b.nrows()`.
    pub fn mult_add_trans_b(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        self.accumulate(
            "mult_add_trans_b",
            Transpose::None,
            Transpose::Ordinary,
            a,
            b,
        )
    }

    /// The quadratic form `self = a' * b * a` for a square `b`.
    pub fn mult_quad(&mut self, a: &NativeMatrix, b: &NativeMatrix) -> MatrixResult<()> {
        if !b.shape().is_square() {
            return Err(MatrixError::NotSquare {
                operation: "mult_quad",
                shape: b.shape(),
            });
        }
        check_inner("mult_quad", b.shape(), a.shape())?;

        let (n, m) = (a.nrows(), a.ncols());
        let mut tmp = vec![0.0; n * m];
        linalg::gemm(
            Transpose::None,
            Transpose::None,
            1.0,
            b.as_view(),
            a.as_view(),
            None,
            MutStridedView::dense(tmp.as_mut_slice(), n, m),
        );

        self.resize(m, m);
        linalg::gemm(
            Transpose::Ordinary,
            Transpose::None,
            1.0,
            a.as_view(),
            StridedView::dense(tmp.as_slice(), n, m),
            None,
            self.as_mut_view(),
        );
        Ok(())
    }

    /// `self = scale * a`.
    pub fn scale(&mut self, scale: f64, a: &NativeMatrix) {
        self.resize(a.nrows(), a.ncols());
        linalg::scale(scale, a.as_view(), self.as_mut_view());
    }

    /// `self = a'`.
    pub fn transpose(&mut self, a: &NativeMatrix) {
        self.resize(a.ncols(), a.nrows());
        linalg::copy(Transpose::Ordinary, a.as_view(), self.as_mut_view());
    }

    fn product(
        &mut self,
        operation: &'static str,
        atranspose: Transpose,
        btranspose: Transpose,
        scale: f64,
        a: &NativeMatrix,
        b: &NativeMatrix,
    ) -> MatrixResult<()> {
        let lhs = transposed(atranspose, a.shape());
        let rhs = transposed(btranspose, b.shape());
        check_inner(operation, lhs, rhs)?;

        self.resize(lhs.nrows, rhs.ncols);
        linalg::gemm(
            atranspose,
            btranspose,
            scale,
            a.as_view(),
            b.as_view(),
            None,
            self.as_mut_view(),
        );
        Ok(())
    }

    fn accumulate(
        &mut self,
        operation: &'static str,
        atranspose: Transpose,
        btranspose: Transpose,
        a: &NativeMatrix,
        b: &NativeMatrix,
    ) -> MatrixResult<()> {
        let lhs = transposed(atranspose, a.shape());
        let rhs = transposed(btranspose, b.shape());
        check_inner(operation, lhs, rhs)?;
        check_receiver(operation, Shape::new(lhs.nrows, rhs.ncols), self.shape())?;

        linalg::gemm(
            atranspose,
            btranspose,
            1.0,
            a.as_view(),
            b.as_view(),
            Some(1.0),
            self.as_mut_view(),
        );
        Ok(())
    }
}

fn transposed(transpose: Transpose, shape: Shape) -> Shape {
    transpose.forward(shape, shape.transpose())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        error::MatrixErrorKind,
        test_util::{random, row_major},
    };

    fn assert_matrix_eq(got: &NativeMatrix, expected: &NativeMatrix) {
        assert_eq!(got.shape(), expected.shape());
        for (g, e) in got.as_slice().iter().zip(expected.as_slice()) {
            assert_abs_diff_eq!(g, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_add_subtract() {
        let a = row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = row_major(2, 2, &[5.0, 6.0, 7.0, 8.0]);

        let mut c = NativeMatrix::new(0, 0);
        c.add(&a, &b).unwrap();
        assert_matrix_eq(&c, &row_major(2, 2, &[6.0, 8.0, 10.0, 12.0]));

        c.subtract(&a, &b).unwrap();
        assert_matrix_eq(&c, &row_major(2, 2, &[-4.0, -4.0, -4.0, -4.0]));
    }

    #[test]
    fn test_add_shape_mismatch_leaves_receiver() {
        let a = NativeMatrix::new(2, 3);
        let b = NativeMatrix::new(3, 2);
        let mut c = row_major(1, 1, &[42.0]);

        let err = c.add(&a, &b).unwrap_err();
        assert_eq!(err.kind(), MatrixErrorKind::InvalidDimension);
        assert_eq!(
            err.to_string(),
            "add: operands of shape 2x3 and 3x2 are incompatible"
        );
        assert_matrix_eq(&c, &row_major(1, 1, &[42.0]));

        assert!(c.subtract(&a, &b).is_err());
        assert_matrix_eq(&c, &row_major(1, 1, &[42.0]));
    }

    #[test]
    fn test_mult() {
        let a = row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = row_major(2, 2, &[5.0, 6.0, 7.0, 8.0]);

        let mut c = NativeMatrix::new(0, 0);
        c.mult(&a, &b).unwrap();
        assert_matrix_eq(&c, &row_major(2, 2, &[19.0, 22.0, 43.0, 50.0]));

        c.mult_scaled(-2.0, &a, &b).unwrap();
        assert_matrix_eq(&c, &row_major(2, 2, &[-38.0, -44.0, -86.0, -100.0]));

        let v = row_major(2, 1, &[1.0, -1.0]);
        c.mult(&a, &v).unwrap();
        assert_matrix_eq(&c, &row_major(2, 1, &[-1.0, -1.0]));

        let err = c.mult(&v, &a).unwrap_err();
        assert_eq!(err.kind(), MatrixErrorKind::InvalidDimension);
        assert_matrix_eq(&c, &row_major(2, 1, &[-1.0, -1.0]));
    }

    #[rstest]
    #[case(3, 4, 5)]
    #[case(1, 7, 2)]
    #[case(6, 1, 6)]
    fn test_transposed_products(#[case] m: usize, #[case] k: usize, #[case] n: usize) {
        let a = random(m, k, 1);
        let b = random(k, n, 2);

        let mut expected = NativeMatrix::new(0, 0);
        expected.mult(&a, &b).unwrap();

        let mut at = NativeMatrix::new(0, 0);
        at.transpose(&a);
        let mut bt = NativeMatrix::new(0, 0);
        bt.transpose(&b);

        let mut c = NativeMatrix::new(0, 0);
        c.mult_trans_a(&at, &b).unwrap();
        assert_matrix_eq(&c, &expected);

        c.mult_trans_b(&a, &bt).unwrap();
        assert_matrix_eq(&c, &expected);

        // Accumulating the same product onto itself doubles it.
        let mut doubled = NativeMatrix::new(0, 0);
        doubled.scale(2.0, &expected);

        let mut c = expected.clone();
        c.mult_add(&a, &b).unwrap();
        assert_matrix_eq(&c, &doubled);

        let mut c = expected.clone();
        c.mult_add_trans_a(&at, &b).unwrap();
        assert_matrix_eq(&c, &doubled);

        let mut c = expected.clone();
        c.mult_add_trans_b(&a, &bt).unwrap();
        assert_matrix_eq(&c, &doubled);
    }

    #[test]
    fn test_mult_add_requires_receiver_shape() {
        let a = random(2, 3, 3);
        let b = random(3, 4, 4);
        let mut c = NativeMatrix::new(4, 2);
        let capacity = c.capacity();

        let err = c.mult_add(&a, &b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mult_add: expected a receiver of shape 2x4, found 4x2"
        );
        assert_eq!(c.shape(), Shape::new(4, 2));
        assert_eq!(c.capacity(), capacity);
        assert_eq!(c.as_slice(), &[0.0; 8]);

        assert!(c.mult_add_trans_a(&a, &b).is_err());
        assert!(c.mult_add_trans_b(&a, &b).is_err());
        assert!(c.mult_trans_a(&a, &b).is_err());
        assert!(c.mult_trans_b(&a, &b).is_err());
        assert_eq!(c.as_slice(), &[0.0; 8]);
    }

    #[test]
    fn test_mult_quad() {
        let a = row_major(2, 3, &[1.0, 0.0, 2.0, -1.0, 3.0, 1.0]);
        let b = row_major(2, 2, &[2.0, 1.0, 1.0, 3.0]);

        let mut expected = NativeMatrix::new(0, 0);
        let mut ba = NativeMatrix::new(0, 0);
        ba.mult(&b, &a).unwrap();
        expected.mult_trans_a(&a, &ba).unwrap();

        let mut c = NativeMatrix::new(0, 0);
        c.mult_quad(&a, &b).unwrap();
        assert_eq!(c.shape(), Shape::new(3, 3));
        assert_matrix_eq(&c, &expected);
        assert_matrix_eq(
            &c,
            &row_major(3, 3, &[3.0, -6.0, 0.0, -6.0, 27.0, 15.0, 0.0, 15.0, 15.0]),
        );

        let err = c.mult_quad(&b, &a).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mult_quad: expected a square matrix, found 2x3"
        );

        let err = c.mult_quad(&NativeMatrix::new(3, 1), &b).unwrap_err();
        assert_eq!(err.kind(), MatrixErrorKind::InvalidDimension);
        assert_eq!(c.shape(), Shape::new(3, 3));
    }

    #[test]
    fn test_scale_set_transpose() {
        let a = row_major(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let mut c = NativeMatrix::new(5, 5);
        c.scale(0.5, &a);
        assert_matrix_eq(&c, &row_major(2, 3, &[0.5, 1.0, 1.5, 2.0, 2.5, 3.0]));
        assert_eq!(c.capacity(), 25);

        c.set(&a);
        assert_matrix_eq(&c, &a);

        c.transpose(&a);
        assert_matrix_eq(&c, &row_major(3, 2, &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]));
    }
}
