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

//! A small CLI that generates a random categorical raster, fans the
//! geometry analysis of every category present out across a worker pool,
//! and prints the result as JSON. Stands in for the plotting/reporting
//! front-end the library itself deliberately stays out of.

use clap::{Parser, ValueEnum};
use clusterqt::{geometry_cancellable, parallel, CancelToken, ClusterGeometry, Engine, Options, Raster};
use rand::Rng;
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(
    name = "clusterqt-analyze",
    about = "Generates a random categorical raster and reports per-category cluster geometry"
)]
struct Cli {
    /// Raster width, in pixels.
    #[arg(long, default_value_t = 16)]
    width: u32,

    /// Raster height, in pixels.
    #[arg(long, default_value_t = 16)]
    height: u32,

    /// Number of distinct categories to scatter across the raster (codes 0..categories).
    #[arg(long, default_value_t = 3)]
    categories: u8,

    /// Which engine computes the components.
    #[arg(long, value_enum, default_value_t = EngineArg::Quadtree)]
    engine: EngineArg,

    /// Worker thread count for the category fan-out.
    #[arg(long, default_value_t = 4)]
    threads: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum EngineArg {
    Dense,
    Quadtree,
}

impl From<EngineArg> for Engine {
    fn from(value: EngineArg) -> Self {
        match value {
            EngineArg::Dense => Engine::Dense,
            EngineArg::Quadtree => Engine::Quadtree,
        }
    }
}

fn main() {
    let _logger = clusterqt::logger::create_stdout_logger().expect("logger initialization failed");
    let cli = Cli::parse();

    let raster = random_raster(cli.width, cli.height, cli.categories.max(1));
    let options = Options {
        engine: cli.engine.into(),
        ..Options::default()
    };
    let present_categories = raster.categories();

    log::info!(
        "analyzing a {}x{} raster over {} categor{}",
        raster.width(),
        raster.height(),
        present_categories.len(),
        if present_categories.len() == 1 { "y" } else { "ies" }
    );

    let results: BTreeMap<u8, Vec<ClusterGeometry>> = parallel::analyze_categories(
        &raster,
        &present_categories,
        cli.threads,
        &CancelToken::never(),
        move |raster, category| geometry_cancellable(raster, category, &options, &CancelToken::never()),
    )
    .expect("category analysis failed");

    println!(
        "{}",
        serde_json::to_string_pretty(&results).expect("geometry results are always serializable")
    );
}

fn random_raster(width: u32, height: u32, categories: u8) -> Raster {
    let mut rng = rand::rng();
    let cells = (0..width as usize * height as usize)
        .map(|_| rng.random_range(0..categories))
        .collect();
    Raster::new(width, height, cells).expect("generated raster shape always matches its cell count")
}
