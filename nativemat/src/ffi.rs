/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! C-compatible entry points.
//!
//! Every operation returns `true` on success and `false` on failure. Failures are logged
//! at `debug` level, except for a singular system in [`nativemat_solve_check`] which is
//! logged at `warn` level. Dimensions and coordinates are `i32`: negative values are
//! rejected.
//!
//! External buffers are always row-major.
//!
//! A receiver may also be passed as one of its own operands. The operand is then copied
//! before the receiver is written.
//!
//! # Safety
//!
//! Every function taking raw pointers requires that:
//!
//! * Non-null matrix handles were returned by [`nativemat_new`], have not been passed to
//!   [`nativemat_delete`], and are not used concurrently from another thread.
//! * Non-null buffers are valid for reads (or writes, for outputs) of `rows * cols`
//!   doubles and do not overlap any matrix storage.

use std::{borrow::Cow, ptr, slice};

use nativemat_utils::views::{MatrixView, MutMatrixView};
use tracing::{debug, warn};

use crate::{
    error::{MatrixError, MatrixErrorKind, MatrixResult},
    matrix::NativeMatrix,
    region::Region,
};

fn report(operation: &'static str, result: MatrixResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) if err.kind() == MatrixErrorKind::Singular => {
            warn!(operation, %err, "filled the receiver with NaN");
            false
        }
        Err(err) => {
            debug!(operation, %err, "rejected native matrix call");
            false
        }
    }
}

fn run(operation: &'static str, f: impl FnOnce() -> MatrixResult<()>) -> bool {
    report(operation, f())
}

fn dimension(name: &'static str, value: i32) -> MatrixResult<usize> {
    usize::try_from(value).map_err(|_| MatrixError::NegativeDimension {
        name,
        value: value.into(),
    })
}

fn coordinate(name: &'static str, value: i32) -> MatrixResult<usize> {
    usize::try_from(value).map_err(|_| MatrixError::NegativeCoordinate {
        name,
        value: value.into(),
    })
}

/// Build the region `[y0, y1) x [x0, x1)`, rejecting negative coordinates.
fn region(y0: i32, y1: i32, x0: i32, x1: i32) -> MatrixResult<Region> {
    Ok(Region::new(
        coordinate("src_y0", y0)?..coordinate("src_y1", y1)?,
        coordinate("src_x0", x0)?..coordinate("src_x1", x1)?,
    ))
}

unsafe fn receiver<'a>(this: *mut NativeMatrix) -> MatrixResult<&'a mut NativeMatrix> {
    // SAFETY: A non-null `this` points to a live, unaliased matrix.
    unsafe { this.as_mut() }.ok_or(MatrixError::NullHandle)
}

unsafe fn shared<'a>(this: *const NativeMatrix) -> MatrixResult<&'a NativeMatrix> {
    // SAFETY: A non-null `this` points to a live matrix.
    unsafe { this.as_ref() }.ok_or(MatrixError::NullHandle)
}

/// Borrow `operand`, or copy it if it is the receiver `this`.
unsafe fn operand<'a>(
    this: *mut NativeMatrix,
    operand: *const NativeMatrix,
) -> MatrixResult<Cow<'a, NativeMatrix>> {
    // SAFETY: Forwarded from the caller.
    let matrix = unsafe { shared(operand) }?;
    if ptr::eq(operand, this) {
        Ok(Cow::Owned(matrix.clone()))
    } else {
        Ok(Cow::Borrowed(matrix))
    }
}

unsafe fn unary(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    f: impl FnOnce(&mut NativeMatrix, &NativeMatrix) -> MatrixResult<()>,
) -> MatrixResult<()> {
    // SAFETY: Forwarded from the caller. Operands are resolved before the receiver is
    // borrowed mutably, and an operand equal to the receiver is copied.
    let a = unsafe { operand(this, a) }?;
    // SAFETY: Forwarded from the caller.
    let this = unsafe { receiver(this) }?;
    f(this, &a)
}

unsafe fn binary(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
    f: impl FnOnce(&mut NativeMatrix, &NativeMatrix, &NativeMatrix) -> MatrixResult<()>,
) -> MatrixResult<()> {
    // SAFETY: See `unary`.
    let a = unsafe { operand(this, a) }?;
    // SAFETY: See `unary`.
    let b = unsafe { operand(this, b) }?;
    // SAFETY: Forwarded from the caller.
    let this = unsafe { receiver(this) }?;
    f(this, &a, &b)
}

unsafe fn input<'a>(data: *const f64, rows: i32, cols: i32) -> MatrixResult<MatrixView<'a, f64>> {
    if data.is_null() {
        return Err(MatrixError::NullBuffer);
    }
    let nrows = dimension("rows", rows)?;
    let ncols = dimension("cols", cols)?;
    // SAFETY: A non-null `data` is valid for `rows * cols` reads.
    let data = unsafe { slice::from_raw_parts(data, nrows * ncols) };
    MatrixView::try_from(data, nrows, ncols).map_err(|err| err.as_static().into())
}

unsafe fn output<'a>(data: *mut f64, rows: i32, cols: i32) -> MatrixResult<MutMatrixView<'a, f64>> {
    if data.is_null() {
        return Err(MatrixError::NullBuffer);
    }
    let nrows = dimension("rows", rows)?;
    let ncols = dimension("cols", cols)?;
    // SAFETY: A non-null `data` is valid for `rows * cols` writes and is not aliased.
    let data = unsafe { slice::from_raw_parts_mut(data, nrows * ncols) };
    MutMatrixView::try_from(data, nrows, ncols).map_err(|err| err.as_static().into())
}

/////////////////////
// Handle lifetime //
/////////////////////

/// Create a zero-filled `rows x cols` matrix. Returns null if either dimension is negative
/// or the storage cannot be allocated.
#[no_mangle]
pub extern "C" fn nativemat_new(rows: i32, cols: i32) -> *mut NativeMatrix {
    let shape = dimension("rows", rows).and_then(|r| Ok((r, dimension("cols", cols)?)));
    match shape.and_then(|(nrows, ncols)| NativeMatrix::try_new(nrows, ncols)) {
        Ok(matrix) => Box::into_raw(Box::new(matrix)),
        Err(err) => {
            debug!(operation = "new", %err, "rejected native matrix call");
            ptr::null_mut()
        }
    }
}

/// Release a matrix created by [`nativemat_new`]. Null is ignored.
///
/// # Safety
///
/// See the [module documentation](self). The handle must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn nativemat_delete(this: *mut NativeMatrix) {
    if !this.is_null() {
        // SAFETY: `this` came from `Box::into_raw` in `nativemat_new`.
        drop(unsafe { Box::from_raw(this) });
    }
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_rows(this: *const NativeMatrix) -> i32 {
    // SAFETY: Forwarded from the caller.
    unsafe { shared(this) }.map_or(-1, |m| i32::try_from(m.nrows()).unwrap_or(i32::MAX))
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_cols(this: *const NativeMatrix) -> i32 {
    // SAFETY: Forwarded from the caller.
    unsafe { shared(this) }.map_or(-1, |m| i32::try_from(m.ncols()).unwrap_or(i32::MAX))
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_resize(this: *mut NativeMatrix, rows: i32, cols: i32) -> bool {
    run("resize", || {
        let nrows = dimension("rows", rows)?;
        let ncols = dimension("cols", cols)?;
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.try_resize(nrows, ncols)
    })
}

////////////////
// Arithmetic //
////////////////

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_set(this: *mut NativeMatrix, a: *const NativeMatrix) -> bool {
    // SAFETY: Forwarded from the caller.
    let result = unsafe {
        unary(this, a, |this, a| {
            this.set(a);
            Ok(())
        })
    };
    report("set", result)
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_add(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("add", unsafe { binary(this, a, b, NativeMatrix::add) })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_subtract(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("subtract", unsafe {
        binary(this, a, b, NativeMatrix::subtract)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult", unsafe { binary(this, a, b, NativeMatrix::mult) })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_scaled(
    this: *mut NativeMatrix,
    scale: f64,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    let result = unsafe { binary(this, a, b, |this, a, b| this.mult_scaled(scale, a, b)) };
    report("mult_scaled", result)
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_add(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult_add", unsafe {
        binary(this, a, b, NativeMatrix::mult_add)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_trans_a(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult_trans_a", unsafe {
        binary(this, a, b, NativeMatrix::mult_trans_a)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_add_trans_a(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult_add_trans_a", unsafe {
        binary(this, a, b, NativeMatrix::mult_add_trans_a)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_trans_b(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult_trans_b", unsafe {
        binary(this, a, b, NativeMatrix::mult_trans_b)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_add_trans_b(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult_add_trans_b", unsafe {
        binary(this, a, b, NativeMatrix::mult_add_trans_b)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_quad(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("mult_quad", unsafe {
        binary(this, a, b, NativeMatrix::mult_quad)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_scale(
    this: *mut NativeMatrix,
    scale: f64,
    a: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    let result = unsafe {
        unary(this, a, |this, a| {
            this.scale(scale, a);
            Ok(())
        })
    };
    report("scale", result)
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_transpose(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    let result = unsafe {
        unary(this, a, |this, a| {
            this.transpose(a);
            Ok(())
        })
    };
    report("transpose", result)
}

////////////
// Blocks //
////////////

/// Add `scale` times the `rows x cols` block of `a` at `(src_row, src_col)` into the block
/// of `this` at `(dest_row, dest_col)`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn nativemat_add_block(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    dest_row: i32,
    dest_col: i32,
    src_row: i32,
    src_col: i32,
    rows: i32,
    cols: i32,
    scale: f64,
) -> bool {
    run("add_block", || {
        let dst_row = coordinate("dest_row", dest_row)?;
        let dst_col = coordinate("dest_col", dest_col)?;
        let src = Region::at(
            coordinate("src_row", src_row)?,
            coordinate("src_col", src_col)?,
            coordinate("rows", rows)?,
            coordinate("cols", cols)?,
        );
        // SAFETY: Forwarded from the caller.
        unsafe {
            unary(this, a, |this, a| {
                this.add_block(a, dst_row, dst_col, src, scale)
            })
        }
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_mult_add_block(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
    row_start: i32,
    col_start: i32,
) -> bool {
    run("mult_add_block", || {
        let row = coordinate("row_start", row_start)?;
        let col = coordinate("col_start", col_start)?;
        // SAFETY: Forwarded from the caller.
        unsafe { binary(this, a, b, |this, a, b| this.mult_add_block(a, b, row, col)) }
    })
}

/// Copy the block `[src_y0, src_y1) x [src_x0, src_x1)` of `src` into `this` at
/// `(dst_y0, dst_x0)`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn nativemat_insert(
    this: *mut NativeMatrix,
    src: *const NativeMatrix,
    src_y0: i32,
    src_y1: i32,
    src_x0: i32,
    src_x1: i32,
    dst_y0: i32,
    dst_x0: i32,
) -> bool {
    run("insert", || {
        let region = region(src_y0, src_y1, src_x0, src_x1)?;
        let dst_row = coordinate("dst_y0", dst_y0)?;
        let dst_col = coordinate("dst_x0", dst_x0)?;
        // SAFETY: Forwarded from the caller.
        unsafe {
            unary(this, src, |this, src| {
                this.insert(src, region, dst_row, dst_col)
            })
        }
    })
}

/// Copy all of `src` into `this` at `(dst_row, dst_col)`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_insert_matrix(
    this: *mut NativeMatrix,
    src: *const NativeMatrix,
    dst_row: i32,
    dst_col: i32,
) -> bool {
    run("insert_matrix", || {
        let row = coordinate("dst_row", dst_row)?;
        let col = coordinate("dst_col", dst_col)?;
        // SAFETY: Forwarded from the caller.
        unsafe { unary(this, src, |this, src| this.insert_matrix(src, row, col)) }
    })
}

/// Copy the block `[src_y0, src_y1) x [src_x0, src_x1)` of the row-major
/// `src_rows x src_cols` buffer `src` into `this` at `(dst_y0, dst_x0)`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn nativemat_insert_buffer(
    this: *mut NativeMatrix,
    src: *const f64,
    src_rows: i32,
    src_cols: i32,
    src_y0: i32,
    src_y1: i32,
    src_x0: i32,
    src_x1: i32,
    dst_y0: i32,
    dst_x0: i32,
) -> bool {
    run("insert_buffer", || {
        // SAFETY: Forwarded from the caller.
        let src = unsafe { input(src, src_rows, src_cols) }?;
        let region = region(src_y0, src_y1, src_x0, src_x1)?;
        let dst_row = coordinate("dst_y0", dst_y0)?;
        let dst_col = coordinate("dst_x0", dst_x0)?;
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.insert_row_major(src, region, dst_row, dst_col)
    })
}

/// Copy the block `[src_y0, src_y1) x [src_x0, src_x1)` of `this` into the row-major
/// `dst_rows x dst_cols` buffer `dst` at `(dst_y0, dst_x0)`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn nativemat_extract(
    this: *const NativeMatrix,
    src_y0: i32,
    src_y1: i32,
    src_x0: i32,
    src_x1: i32,
    dst: *mut f64,
    dst_rows: i32,
    dst_cols: i32,
    dst_y0: i32,
    dst_x0: i32,
) -> bool {
    run("extract", || {
        // SAFETY: Forwarded from the caller.
        let dst = unsafe { output(dst, dst_rows, dst_cols) }?;
        let region = region(src_y0, src_y1, src_x0, src_x1)?;
        let dst_row = coordinate("dst_y0", dst_y0)?;
        let dst_col = coordinate("dst_x0", dst_x0)?;
        // SAFETY: Forwarded from the caller.
        unsafe { shared(this) }?.extract(region, dst, dst_row, dst_col)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_remove_row(this: *mut NativeMatrix, row: i32) -> bool {
    run("remove_row", || {
        let row = coordinate("row", row)?;
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.remove_row(row)
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_remove_column(this: *mut NativeMatrix, col: i32) -> bool {
    run("remove_column", || {
        let col = coordinate("col", col)?;
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.remove_column(col)
    })
}

////////////////////
// Decompositions //
////////////////////

/// Invert `a` into `this`. A singular `a` is not detected.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_invert(this: *mut NativeMatrix, a: *const NativeMatrix) -> bool {
    // SAFETY: Forwarded from the caller.
    report("invert", unsafe { unary(this, a, NativeMatrix::invert) })
}

/// Solve `a * this = b`. A singular `a` is not detected.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_solve(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("solve", unsafe { binary(this, a, b, NativeMatrix::solve) })
}

/// Solve `a * this = b`, returning `false` and filling `this` with NaN if `a` is singular.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_solve_check(
    this: *mut NativeMatrix,
    a: *const NativeMatrix,
    b: *const NativeMatrix,
) -> bool {
    // SAFETY: Forwarded from the caller.
    report("solve_check", unsafe {
        binary(this, a, b, NativeMatrix::solve_check)
    })
}

///////////////////////
// Data interchange //
///////////////////////

/// Resize `this` to `rows x cols` and copy in the row-major buffer `data`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_set_data(
    this: *mut NativeMatrix,
    data: *const f64,
    rows: i32,
    cols: i32,
) -> bool {
    run("set_data", || {
        // SAFETY: Forwarded from the caller.
        let src = unsafe { input(data, rows, cols) }?;
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.set_row_major(src);
        Ok(())
    })
}

/// Copy `this` into the row-major buffer `data`, which must be exactly `rows x cols`.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_get_data(
    this: *const NativeMatrix,
    data: *mut f64,
    rows: i32,
    cols: i32,
) -> bool {
    run("get_data", || {
        // SAFETY: Forwarded from the caller.
        let dst = unsafe { output(data, rows, cols) }?;
        // SAFETY: Forwarded from the caller.
        unsafe { shared(this) }?.get_row_major(dst)
    })
}

/// Write the element at `(row, col)` to `value`.
///
/// # Safety
///
/// See the [module documentation](self). A non-null `value` must be valid for one write.
#[no_mangle]
pub unsafe extern "C" fn nativemat_get_element(
    this: *const NativeMatrix,
    row: i32,
    col: i32,
    value: *mut f64,
) -> bool {
    run("get_element", || {
        if value.is_null() {
            return Err(MatrixError::NullBuffer);
        }
        let row = coordinate("row", row)?;
        let col = coordinate("col", col)?;
        // SAFETY: Forwarded from the caller.
        let element = unsafe { shared(this) }?.element(row, col)?;
        // SAFETY: `value` is non-null and valid for one write.
        unsafe { value.write(element) };
        Ok(())
    })
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_set_element(
    this: *mut NativeMatrix,
    row: i32,
    col: i32,
    value: f64,
) -> bool {
    run("set_element", || {
        let row = coordinate("row", row)?;
        let col = coordinate("col", col)?;
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.set_element(row, col, value)
    })
}

/// Return whether `this` and `other` have the same shape and agree to `precision`.
/// Returns `false` if either handle is null.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_is_approx(
    this: *const NativeMatrix,
    other: *const NativeMatrix,
    precision: f64,
) -> bool {
    // SAFETY: Forwarded from the caller. Both handles are only read.
    match unsafe { (shared(this), shared(other)) } {
        (Ok(this), Ok(other)) => this.is_approx(other, precision),
        _ => false,
    }
}

/// Returns `false` if `this` is null.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_contains_nan(this: *const NativeMatrix) -> bool {
    // SAFETY: Forwarded from the caller.
    unsafe { shared(this) }.is_ok_and(NativeMatrix::contains_nan)
}

/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_zero(this: *mut NativeMatrix) -> bool {
    run("zero", || {
        // SAFETY: Forwarded from the caller.
        unsafe { receiver(this) }?.zero();
        Ok(())
    })
}

/// Write `this` to standard output. Null is ignored.
///
/// # Safety
///
/// See the [module documentation](self).
#[no_mangle]
pub unsafe extern "C" fn nativemat_print(this: *const NativeMatrix) {
    // SAFETY: Forwarded from the caller.
    if let Ok(this) = unsafe { shared(this) } {
        this.print();
    }
}
