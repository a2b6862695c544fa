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

//! The single configuration record accepted by every entry point
//! (`spec.md` §6).

use crate::raster::Raster;
use serde::{Deserialize, Serialize};

pub use crate::options_error::OptionsError;

/// Connectivity model. `spec.md` §6 specifies only 4-neighbor adjacency, so
/// this enum deliberately has a single variant rather than leaving room for
/// an unsupported 8-connectivity mode to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connectivity {
    #[default]
    FourNeighbor,
}

/// Which core engine performs the labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Engine {
    /// Dense two-pass union-find over rows/columns (`spec.md` §4.7).
    Dense,
    /// Linear quadtree with level-difference encoding (`spec.md` §4.3-§4.6).
    #[default]
    Quadtree,
}

/// One options record per invocation, per `spec.md` §6's recognized-option
/// table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub connectivity: Connectivity,
    /// Explicit category set; `None` means "all distinct values in `R`".
    pub categories: Option<Vec<u8>>,
    pub engine: Engine,
    /// Overrides the detected category count used by diversity weighting.
    pub category_count_ct: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::default(),
            categories: None,
            engine: Engine::default(),
            category_count_ct: None,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(categories) = &self.categories {
            if categories.is_empty() {
                return Err(OptionsError::EmptyCategories);
            }
        }
        if let Some(ct) = self.category_count_ct {
            if ct < 2 {
                return Err(OptionsError::CategoryCountTooSmall(ct));
            }
        }
        Ok(())
    }

    /// Resolves the category list to analyze for a given raster: the
    /// explicit list if set, otherwise every distinct value present.
    pub fn resolved_categories(&self, raster: &Raster) -> Vec<u8> {
        self.categories.clone().unwrap_or_else(|| raster.categories())
    }

    /// Resolves `Ct`, the total category count used by diversity
    /// weighting: the override if set, otherwise the raster's own distinct
    /// category count.
    pub fn resolved_category_count(&self, raster: &Raster) -> u32 {
        self.category_count_ct
            .unwrap_or_else(|| raster.categories().len() as u32)
    }
}
