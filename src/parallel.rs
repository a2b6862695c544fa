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

//! Multi-threaded fan-out across category masks (`spec.md` §5: "distinct
//! category masks are independent and may be processed on separate worker
//! threads"), behind the `parallel` feature.
//!
//! Grounded in the source repo's analyser pool
//! (`client::application::pipeline::run`): a `threadpool::ThreadPool` runs
//! one task per category, each task's result flowing back over a
//! `crossbeam_channel::unbounded` channel to the collecting thread. Unlike
//! that pool, which keeps workers alive for a long-running MQTT stream, this
//! one is built fresh per call and joined before returning — there is no
//! persistent analysis loop here, just one batch of independent category
//! passes.
//!
//! Parallelism is only ever across categories, never within one category's
//! quadtree build or components pass: the builder's neighbor-bump step and
//! the components pass's label forest are both single-threaded internally,
//! exactly as `spec.md` §5 requires.

use crate::cancel::CancelToken;
use crate::error::Error;
use crate::raster::Raster;
use crossbeam_channel::unbounded;
use log::{debug, info, trace};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Runs `work` once per entry of `categories`, each on its own worker thread
/// in a pool of `thread_count` workers (clamped to at least 1), collecting
/// results keyed by category.
///
/// `cancel` is polled once per category before it is dispatched (`spec.md`
/// §5's third cancellation point); a category already running when
/// cancellation fires still completes and its result is discarded once the
/// overall call returns `Err(Error::Cancelled)`.
pub fn analyze_categories<F, T>(
    raster: &Raster,
    categories: &[u8],
    thread_count: usize,
    cancel: &CancelToken,
    work: F,
) -> Result<BTreeMap<u8, T>, Error>
where
    F: Fn(&Raster, u8) -> Result<T, Error> + Send + Sync + 'static,
    T: Send + 'static,
{
    let pool_size = thread_count.max(1);
    info!("category analysis thread count set to: {pool_size}");
    let pool = threadpool::ThreadPool::with_name("clusterqt-analysis".to_string(), pool_size);
    let (sender, receiver) = unbounded();
    let work = Arc::new(work);
    let raster = Arc::new(raster.clone());

    let mut dispatched = 0usize;
    for &category in categories {
        if cancel.is_cancelled() {
            debug!("category fan-out cancelled after dispatching {dispatched} of {} tasks", categories.len());
            break;
        }
        let sender = sender.clone();
        let work = Arc::clone(&work);
        let raster = Arc::clone(&raster);
        pool.execute(move || {
            trace!("category {category} analysis closure entering...");
            let result = work(&raster, category);
            match sender.send((category, result)) {
                Ok(()) => trace!("category {category} result sent"),
                Err(error) => debug!("stopped to send category {category} result: {error}"),
            }
        });
        dispatched += 1;
    }
    drop(sender);
    pool.join();

    if dispatched < categories.len() {
        return Err(Error::Cancelled);
    }

    let mut results = BTreeMap::new();
    for (category, result) in receiver {
        results.insert(category, result?);
    }
    Ok(results)
}
