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

//! Validation error for a malformed [`crate::options::Options`] record, kept
//! beside `options.rs` in its own file per the grounding repo's own
//! file-splitting convention (`configuration/configuration_error.rs`,
//! `bootstrap/bootstrap_error.rs`, `mobility/quadtree/parse_error.rs`,
//! `exchange/message/content_error.rs`): one `*_error.rs` per validated type.

use thiserror::Error;

/// Validation error for a malformed [`crate::options::Options`] record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OptionsError {
    #[error("category {0} requested but not present in the raster")]
    CategoryNotPresent(u8),
    #[error("category_count_ct override of {0} is below 2, but diversity weighting divides by (Ct - 1)")]
    CategoryCountTooSmall(u32),
    #[error("categories list is empty")]
    EmptyCategories,
}
