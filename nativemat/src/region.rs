/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{fmt, ops::Range};

use crate::error::{MatrixError, MatrixResult};

/// The logical `(rows, cols)` shape of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub nrows: usize,
    pub ncols: usize,
}

impl Shape {
    pub const fn new(nrows: usize, ncols: usize) -> Self {
        Self { nrows, ncols }
    }

    /// The shape with rows and columns swapped.
    pub const fn transpose(&self) -> Self {
        Self::new(self.ncols, self.nrows)
    }

    pub const fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.nrows, self.ncols)
    }
}

/// A rectangular block addressed by half-open row and column ranges.
///
/// Constructing a region never fails. It is checked against the matrix or buffer it
/// addresses when used, and an inverted range is reported there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Region {
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    /// The `nrows x ncols` block whose top-left corner is `(row, col)`.
    pub fn at(row: usize, col: usize, nrows: usize, ncols: usize) -> Self {
        Self::new(
            row..row.saturating_add(nrows),
            col..col.saturating_add(ncols),
        )
    }

    /// The region covering all of `shape`.
    pub fn full(shape: Shape) -> Self {
        Self::new(0..shape.nrows, 0..shape.ncols)
    }

    /// The extent of the block. Inverted ranges have an empty extent.
    pub fn shape(&self) -> Shape {
        Shape::new(self.rows.len(), self.cols.len())
    }

    /// Check that both ranges are well ordered and lie inside `shape`.
    pub fn check_within(&self, shape: Shape) -> MatrixResult<()> {
        let fits = |range: &Range<usize>, len: usize| range.start <= range.end && range.end <= len;
        if fits(&self.rows, shape.nrows) && fits(&self.cols, shape.ncols) {
            Ok(())
        } else {
            Err(MatrixError::RegionOutOfBounds {
                region: self.clone(),
                shape,
            })
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.rows.start, self.rows.end, self.cols.start, self.cols.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixErrorKind;

    #[test]
    fn test_shape() {
        let shape = Shape::new(2, 3);
        assert!(!shape.is_square());
        assert_eq!(shape.transpose(), Shape::new(3, 2));
        assert_eq!(shape.to_string(), "2x3");
        assert!(Shape::new(4, 4).is_square());
    }

    #[test]
    fn test_region_at() {
        let region = Region::at(1, 2, 3, 4);
        assert_eq!(region, Region::new(1..4, 2..6));
        assert_eq!(region.shape(), Shape::new(3, 4));
        assert_eq!(region.to_string(), "[1..4, 2..6]");

        // Extents that would overflow saturate and then fail the bounds check.
        let huge = Region::at(usize::MAX, 0, 2, 1);
        assert_eq!(huge.rows, usize::MAX..usize::MAX);
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_check_within() {
        let shape = Shape::new(3, 4);
        assert!(Region::full(shape).check_within(shape).is_ok());
        assert!(Region::new(3..3, 4..4).check_within(shape).is_ok());
        assert!(Region::new(1..2, 0..4).check_within(shape).is_ok());

        for region in [
            Region::new(0..4, 0..1),
            Region::new(0..1, 2..5),
            Region::new(2..1, 0..1),
            Region::new(0..1, 3..2),
        ] {
            let err = region.check_within(shape).unwrap_err();
            assert_eq!(err.kind(), MatrixErrorKind::InvalidRegion);
        }

        let err = Region::new(0..4, 0..1).check_within(shape).unwrap_err();
        assert_eq!(
            err.to_string(),
            "region [0..4, 0..1] does not fit inside a 3x4 matrix"
        );
    }
}
