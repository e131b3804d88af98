/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

/// Precision used for approximate equality when a caller has no tolerance of its own.
///
/// This matches the dummy precision of double-precision dense solvers, so two results of
/// the same computation through different code paths still compare equal.
pub const DEFAULT_PRECISION: f64 = 1e-12;

/// The sentinel written into every element of a receiver whose checked solve found a
/// singular system.
pub const NOT_A_NUMBER: f64 = f64::NAN;
