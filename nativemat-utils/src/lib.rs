/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Borrowed matrix views shared by the native matrix crates.
//!
//! * [`views`]: dense row-major views, the layout of every caller-owned buffer.
//! * [`strided`]: column-major views with an explicit column stride, the layout of
//!   matrix storage and of the blocks addressed inside it.

pub mod strided;
pub mod views;
