/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

/// Indicate whether a matrix should be implicitly transposed for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    /// Use a provided matrix directly.
    None,
    /// Use the transpose of a matrix.
    Ordinary,
}

impl Transpose {
    /// Forward one of the arguments, depending on the value of `self`.
    pub fn forward<T>(&self, if_none: T, if_transpose: T) -> T {
        match self {
            Self::None => if_none,
            Self::Ordinary => if_transpose,
        }
    }

    /// Call exactly one of the arguments depending on the value of `self` and return the
    /// result.
    pub fn call<F, G, T>(&self, if_none: F, if_transpose: G) -> T
    where
        F: FnOnce() -> T,
        G: FnOnce() -> T,
    {
        match self {
            Self::None => if_none(),
            Self::Ordinary => if_transpose(),
        }
    }

    /// Return the `(nrows, ncols)` shape of a `nrows x ncols` matrix after applying `self`.
    pub fn shape(&self, nrows: usize, ncols: usize) -> (usize, usize) {
        self.forward((nrows, ncols), (ncols, nrows))
    }
}
