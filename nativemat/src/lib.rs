/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! A dense, column-major `f64` matrix that owns its storage.
//!
//! [`NativeMatrix`] supports arithmetic into a receiver (`self = a * b` and friends), block
//! insertion and extraction, LU based inversion and linear solves, and exchange with
//! row-major buffers. Receivers are resized as needed, and the storage is only reallocated
//! when the new shape needs more elements than are currently allocated.
//!
//! Every fallible operation validates its arguments before writing anything and reports a
//! [`MatrixError`]. The [`ffi`] module exposes the same operations over a C ABI as boolean
//! status codes.
#![cfg_attr(
    not(test),
    warn(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::undocumented_unsafe_blocks
    )
)]

mod arith;
mod block;
mod decomp;
mod interchange;
mod matrix;
mod storage;

pub mod defaults;
pub mod error;
pub mod ffi;
pub mod region;

pub use error::{MatrixError, MatrixErrorKind, MatrixResult};
pub use matrix::NativeMatrix;
pub use region::{Region, Shape};

#[cfg(test)]
mod test_util;
