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

//! Connected-component labeling of categorical rasters over a linear
//! quadtree.
//!
//! Given a dense raster of category codes and one category to analyze,
//! [`clusters`] returns the 4-connected components of that category as
//! lists of pixel coordinates, [`clusters_qt`] returns the same components
//! as the quadtree quads that cover them, and [`geometry`] returns each
//! component's area and perimeter measures.
//!
//! Two engines compute the same components: [`Engine::Dense`], a
//! straightforward two-pass union-find over the raw grid, and
//! [`Engine::Quadtree`] (the default), a linear quadtree with
//! level-difference encoding that avoids re-scanning uniform regions.
//! [`Options::engine`] selects between them; both satisfy the same area,
//! connectivity, and perimeter invariants.
//!
//! ```
//! use clusterqt::{clusters, Options, Raster};
//!
//! let raster = Raster::new(2, 2, vec![1, 1, 1, 1]).unwrap();
//! let found = clusters(&raster, 1, &Options::default()).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].len(), 4);
//! ```
//!
//! Enable the `parallel` feature to fan a batch of categories out across a
//! worker pool ([`parallel::analyze_categories`]); enable `demo` to build
//! the `clusterqt-analyze` binary.

pub mod cancel;
pub mod components;
pub mod dense;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod logger;
pub mod morton;
pub mod options;
pub mod options_error;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod quadtree;
pub mod raster;

pub use cancel::CancelToken;
pub use error::Error;
pub use geometry::ClusterGeometry;
pub use options::{Connectivity, Engine, Options};
pub use quadtree::{Color, QuadEntry};
pub use raster::Raster;

use quadtree::QuadTree;

/// Validates `options` and that `category` is present in `raster`, the
/// check shared by all three entry points below.
fn validate(raster: &Raster, category: u8, options: &Options) -> Result<(), Error> {
    options.validate()?;
    if !raster.categories().contains(&category) {
        return Err(options_error::OptionsError::CategoryNotPresent(category).into());
    }
    Ok(())
}

/// Connected components of `category` in `raster`, as lists of pixel
/// coordinates, using whichever engine `options` selects.
///
/// Equivalent to [`clusters_cancellable`] with a token that never fires.
pub fn clusters(
    raster: &Raster,
    category: u8,
    options: &Options,
) -> Result<Vec<Vec<(u32, u32)>>, Error> {
    clusters_cancellable(raster, category, options, &CancelToken::never())
}

/// As [`clusters`], but cooperatively cancellable through `cancel`.
pub fn clusters_cancellable(
    raster: &Raster,
    category: u8,
    options: &Options,
    cancel: &CancelToken,
) -> Result<Vec<Vec<(u32, u32)>>, Error> {
    validate(raster, category, options)?;
    match options.engine {
        Engine::Dense => Ok(dense::clusters(raster, category)),
        Engine::Quadtree => {
            let resolution = raster.resolution();
            let quads = build_quadtree_clusters(raster, category, resolution, cancel)?;
            Ok(quads.iter().map(|quads| quad_cluster_to_pixels(quads, resolution)).collect())
        }
    }
}

/// Connected components of `category` in `raster`, as the quads of the
/// completed linear quadtree that cover them — only meaningful when
/// [`Options::engine`] is [`Engine::Quadtree`]; with [`Engine::Dense`] this
/// still builds a quadtree to answer the question, since the dense engine
/// has no quad representation of its own.
///
/// Equivalent to [`clusters_qt_cancellable`] with a token that never fires.
pub fn clusters_qt(
    raster: &Raster,
    category: u8,
    options: &Options,
) -> Result<Vec<Vec<QuadEntry>>, Error> {
    clusters_qt_cancellable(raster, category, options, &CancelToken::never())
}

/// As [`clusters_qt`], but cooperatively cancellable through `cancel`.
pub fn clusters_qt_cancellable(
    raster: &Raster,
    category: u8,
    options: &Options,
    cancel: &CancelToken,
) -> Result<Vec<Vec<QuadEntry>>, Error> {
    validate(raster, category, options)?;
    build_quadtree_clusters(raster, category, raster.resolution(), cancel)
}

fn build_quadtree_clusters(
    raster: &Raster,
    category: u8,
    resolution: u32,
    cancel: &CancelToken,
) -> Result<Vec<Vec<QuadEntry>>, Error> {
    let mask = raster.mask_for(category);
    let tree = QuadTree::build(&mask, resolution, cancel)?;
    let clusters = components::run(tree.store(), tree.resolution(), cancel)?;
    Ok(components::clusters_of_color(&clusters, Color::Black))
}

fn quad_cluster_to_pixels(quads: &[QuadEntry], resolution: u32) -> Vec<(u32, u32)> {
    let mut pixels = Vec::new();
    for quad in quads {
        let (llx, lly, urx, ury) = morton::code_to_range(quad.n, quad.l, resolution);
        for y in lly..ury {
            for x in llx..urx {
                pixels.push((x, y));
            }
        }
    }
    pixels
}

/// Area and perimeter measures of each connected component of `category` in
/// `raster`, aligned with the order [`clusters`] would return.
///
/// Equivalent to [`geometry_cancellable`] with a token that never fires.
pub fn geometry(
    raster: &Raster,
    category: u8,
    options: &Options,
) -> Result<Vec<ClusterGeometry>, Error> {
    geometry_cancellable(raster, category, options, &CancelToken::never())
}

/// As [`geometry`], but cooperatively cancellable through `cancel`.
pub fn geometry_cancellable(
    raster: &Raster,
    category: u8,
    options: &Options,
    cancel: &CancelToken,
) -> Result<Vec<ClusterGeometry>, Error> {
    let pixel_clusters = clusters_cancellable(raster, category, options, cancel)?;
    let category_count_ct = options.resolved_category_count(raster);
    Ok(pixel_clusters
        .iter()
        .map(|cells| geometry::measure(raster, cells, category_count_ct))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster_8x8() -> Raster {
        let rows: [[u8; 8]; 8] = [
            [1, 1, 1, 1, 1, 0, 0, 0],
            [1, 1, 1, 1, 1, 0, 0, 0],
            [1, 1, 1, 1, 1, 1, 0, 0],
            [1, 1, 1, 1, 1, 1, 0, 0],
            [0, 0, 0, 0, 1, 1, 1, 1],
            [0, 0, 0, 0, 1, 1, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
        ];
        let mut cells = vec![0u8; 64];
        for (row, values) in rows.iter().enumerate() {
            let y = 7 - row;
            for (x, &value) in values.iter().enumerate() {
                cells[y * 8 + x] = value;
            }
        }
        Raster::new(8, 8, cells).unwrap()
    }

    #[test]
    fn dense_and_quadtree_engines_agree_on_pixel_coverage() {
        let raster = raster_8x8();
        let dense_found = clusters(
            &raster,
            1,
            &Options {
                engine: Engine::Dense,
                ..Options::default()
            },
        )
        .unwrap();
        let quadtree_found = clusters(
            &raster,
            1,
            &Options {
                engine: Engine::Quadtree,
                ..Options::default()
            },
        )
        .unwrap();
        assert_eq!(dense_found.len(), 1);
        assert_eq!(quadtree_found.len(), 1);

        let mut dense_pixels = dense_found[0].clone();
        let mut quadtree_pixels = quadtree_found[0].clone();
        dense_pixels.sort();
        quadtree_pixels.sort();
        assert_eq!(dense_pixels, quadtree_pixels);
    }

    #[test]
    fn clusters_qt_returns_only_the_requested_colors_quads() {
        let raster = raster_8x8();
        let quads = clusters_qt(&raster, 1, &Options::default()).unwrap();
        assert_eq!(quads.len(), 1);
        assert!(quads[0].iter().all(|quad| quad.v == Color::Black));
    }

    #[test]
    fn geometry_is_aligned_with_clusters_order() {
        let raster = Raster::new(2, 2, vec![1, 2, 2, 1]).unwrap();
        let found = clusters(&raster, 1, &Options::default()).unwrap();
        let measures = geometry(&raster, 1, &Options::default()).unwrap();
        assert_eq!(found.len(), measures.len());
        for (cells, measure) in found.iter().zip(&measures) {
            assert_eq!(measure.area, cells.len());
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let raster = Raster::new(2, 2, vec![1, 1, 1, 1]).unwrap();
        let result = clusters(&raster, 9, &Options::default());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn cancellation_propagates_through_the_public_entry_points() {
        let raster = raster_8x8();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = clusters_cancellable(&raster, 1, &Options::default(), &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
