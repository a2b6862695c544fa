/*
 * Software Name : clusterqt
 * SPDX-FileCopyrightText: Copyright (c) Orange SA
 * SPDX-License-Identifier: MIT
 *
 * This software is distributed under the MIT license,
 * see the "LICENSE.txt" file for more details or https://opensource.org/license/MIT/
 *
 * Authors: see CONTRIBUTORS.md
 */

use crate::options_error::OptionsError;
use thiserror::Error;

/// Crate-level error, aggregating every way an analysis pass can fail.
///
/// All four kinds abort the current pass: no partial cluster set is ever
/// returned to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The raster shape, a requested category, or an option was malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The quadtree resolution `r = ceil(log2(max(width, height)))` exceeds
    /// what a 64-bit location code can hold (`r > 31`).
    #[error("resolution {resolution} exceeds the 64-bit location code budget (r <= 31)")]
    ResolutionOverflow { resolution: u32 },

    /// A [`CancelToken`](crate::cancel::CancelToken) fired mid-pass.
    #[error("analysis cancelled")]
    Cancelled,

    /// A neighbor-finder invariant was violated; this should never occur for
    /// well-formed input and always aborts the pass.
    #[error("internal invariant violated at quad (n={n:#x}, l={level}): {detail}")]
    Internal {
        n: u64,
        level: u8,
        detail: &'static str,
    },
}

impl From<OptionsError> for Error {
    fn from(value: OptionsError) -> Self {
        Error::InvalidInput(value.to_string())
    }
}
