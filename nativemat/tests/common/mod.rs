/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

#![allow(dead_code)]

use nativemat::NativeMatrix;
use nativemat_utils::views::MatrixView;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

pub fn row_major(nrows: usize, ncols: usize, data: &[f64]) -> NativeMatrix {
    NativeMatrix::from_row_major(MatrixView::try_from(data, nrows, ncols).unwrap())
}

pub fn random(nrows: usize, ncols: usize, rng: &mut StdRng) -> NativeMatrix {
    let data: Vec<f64> = (0..nrows * ncols)
        .map(|_| StandardNormal.sample(rng))
        .collect();
    row_major(nrows, ncols, &data)
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Create a subscriber for the integration tests.
///
/// The returned guard installs the subscriber for the current thread only, so tests running
/// in parallel do not conflict.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}
