// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::powf` and `f64::cos` are not available in `core`. The easing curves need
//! both, so this trait dispatches to `libm` when `std` is off.

pub(crate) trait FloatExt {
    fn powf(self, n: Self) -> Self;
    fn cos(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn powf(self, n: Self) -> Self {
        libm::pow(self, n)
    }

    fn cos(self) -> Self {
        libm::cos(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("ringchart requires either the `std` or `libm` feature");
