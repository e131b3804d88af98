/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Matrix builders shared by the unit tests.

use nativemat_utils::views::MatrixView;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::NativeMatrix;

/// Build a matrix from literal row-major `data`.
pub(crate) fn row_major(nrows: usize, ncols: usize, data: &[f64]) -> NativeMatrix {
    NativeMatrix::from_row_major(MatrixView::try_from(data, nrows, ncols).unwrap())
}

/// Build a matrix whose elements are all distinct, with `(i, j)` holding `10 * i + j + 1`.
pub(crate) fn counting(nrows: usize, ncols: usize) -> NativeMatrix {
    let mut m = NativeMatrix::new(nrows, ncols);
    for row in 0..nrows {
        for col in 0..ncols {
            let value = (10 * row + col + 1) as f64;
            m.set_element(row, col, value).unwrap();
        }
    }
    m
}

/// Build a matrix with standard normal elements drawn from a generator seeded with `seed`.
pub(crate) fn random(nrows: usize, ncols: usize, seed: u64) -> NativeMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..nrows * ncols)
        .map(|_| StandardNormal.sample(&mut rng))
        .collect();
    row_major(nrows, ncols, &data)
}

/// A random `dim x dim` matrix made strictly diagonally dominant in expectation.
pub(crate) fn random_well_conditioned(dim: usize, seed: u64) -> NativeMatrix {
    let mut m = random(dim, dim, seed);
    for i in 0..dim {
        let diagonal = m.element(i, i).unwrap();
        m.set_element(i, i, diagonal + 2.0 * dim as f64).unwrap();
    }
    m
}

/// Install a thread-local subscriber so log output is captured per test.
pub(crate) fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
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
