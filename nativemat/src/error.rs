/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use nativemat_linalg::SingularMatrix;
use nativemat_utils::views;
use thiserror::Error;

use crate::region::{Region, Shape};

/// Convenience alias for a `Result<T, MatrixError>`.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// The coarse category of a [`MatrixError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum MatrixErrorKind {
    /// Operand shapes are incompatible for the requested operation.
    InvalidDimension,
    /// Block or index coordinates are negative, inverted or out of bounds.
    InvalidRegion,
    /// An external buffer pointer is null.
    NullBuffer,
    /// The system matrix of a checked solve is not invertible.
    Singular,
    /// A matrix handle passed across the C boundary is null.
    NullHandle,
    /// The storage for a requested shape cannot be allocated.
    Allocation,
}

/// Error returned by every fallible matrix operation.
///
/// No operation mutates its receiver before returning an error, with the single
/// exception of [`Singular`](MatrixError::Singular) from
/// [`NativeMatrix::solve_check`](crate::NativeMatrix::solve_check).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum MatrixError {
    #[error("{operation}: operands of shape {lhs} and {rhs} are incompatible")]
    IncompatibleShapes {
        operation: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    #[error("{operation}: expected a receiver of shape {expected}, found {found}")]
    ReceiverShape {
        operation: &'static str,
        expected: Shape,
        found: Shape,
    },

    #[error("{operation}: expected a square matrix, found {shape}")]
    NotSquare {
        operation: &'static str,
        shape: Shape,
    },

    #[error("{operation}: expected a single column, found {shape}")]
    NotColumn {
        operation: &'static str,
        shape: Shape,
    },

    #[error("dimension `{name}` must be non-negative, found {value}")]
    NegativeDimension { name: &'static str, value: i64 },

    #[error(transparent)]
    BufferLength(#[from] views::TryFromErrorLight),

    #[error("region {region} does not fit inside a {shape} matrix")]
    RegionOutOfBounds { region: Region, shape: Shape },

    #[error("a {extent} block at ({row}, {col}) does not fit inside a {shape} matrix")]
    BlockOutOfBounds {
        row: usize,
        col: usize,
        extent: Shape,
        shape: Shape,
    },

    #[error("index ({row}, {col}) is out of bounds for a {shape} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        shape: Shape,
    },

    #[error("row {row} is out of bounds for a {shape} matrix")]
    RowOutOfBounds { row: usize, shape: Shape },

    #[error("column {col} is out of bounds for a {shape} matrix")]
    ColumnOutOfBounds { col: usize, shape: Shape },

    #[error("coordinate `{name}` must be non-negative, found {value}")]
    NegativeCoordinate { name: &'static str, value: i64 },

    #[error("a required buffer pointer is null")]
    NullBuffer,

    #[error("a required matrix handle is null")]
    NullHandle,

    #[error(transparent)]
    Singular(#[from] SingularMatrix),

    #[error("cannot allocate storage for a {shape} matrix")]
    Allocation { shape: Shape },
}

impl MatrixError {
    /// Return the category of the error.
    pub fn kind(&self) -> MatrixErrorKind {
        match self {
            Self::IncompatibleShapes { .. }
            | Self::ReceiverShape { .. }
            | Self::NotSquare { .. }
            | Self::NotColumn { .. }
            | Self::NegativeDimension { .. }
            | Self::BufferLength(_) => MatrixErrorKind::InvalidDimension,
            Self::RegionOutOfBounds { .. }
            | Self::BlockOutOfBounds { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::RowOutOfBounds { .. }
            | Self::ColumnOutOfBounds { .. }
            | Self::NegativeCoordinate { .. } => MatrixErrorKind::InvalidRegion,
            Self::NullBuffer => MatrixErrorKind::NullBuffer,
            Self::NullHandle => MatrixErrorKind::NullHandle,
            Self::Singular(_) => MatrixErrorKind::Singular,
            Self::Allocation { .. } => MatrixErrorKind::Allocation,
        }
    }

    pub(crate) fn incompatible(operation: &'static str, lhs: Shape, rhs: Shape) -> Self {
        Self::IncompatibleShapes {
            operation,
            lhs,
            rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MatrixError::incompatible("add", Shape::new(2, 3), Shape::new(3, 2));
        assert_eq!(
            err.to_string(),
            "add: operands of shape 2x3 and 3x2 are incompatible"
        );
        assert_eq!(err.kind(), MatrixErrorKind::InvalidDimension);

        let err = MatrixError::BlockOutOfBounds {
            row: 1,
            col: 2,
            extent: Shape::new(2, 2),
            shape: Shape::new(2, 3),
        };
        assert_eq!(
            err.to_string(),
            "a 2x2 block at (1, 2) does not fit inside a 2x3 matrix"
        );
        assert_eq!(err.kind(), MatrixErrorKind::InvalidRegion);

        let err = MatrixError::NegativeCoordinate {
            name: "src_row",
            value: -1,
        };
        assert_eq!(
            err.to_string(),
            "coordinate `src_row` must be non-negative, found -1"
        );
        assert_eq!(err.kind(), MatrixErrorKind::InvalidRegion);
    }

    #[test]
    fn test_kind() {
        assert_eq!(MatrixError::NullBuffer.kind(), MatrixErrorKind::NullBuffer);
        assert_eq!(MatrixError::NullHandle.kind(), MatrixErrorKind::NullHandle);

        let err = MatrixError::NegativeDimension {
            name: "rows",
            value: -3,
        };
        assert_eq!(err.kind(), MatrixErrorKind::InvalidDimension);

        let err = views::MatrixView::try_from([0.0f64; 3].as_slice(), 2, 2)
            .map_err(|err| MatrixError::from(err.as_static()))
            .unwrap_err();
        assert_eq!(err.kind(), MatrixErrorKind::InvalidDimension);
    }
}
