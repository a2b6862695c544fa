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

//! Stdout logger setup for the `clusterqt-analyze` demo binary. The library
//! itself only emits `log` records through the call sites in
//! [`crate::components`] and [`crate::quadtree::builder`]; it never installs
//! a logger implementation, leaving that choice to the binary crate.

use flexi_logger::Logger;
use log::info;

/// Creates a logger that outputs to stdout, level controlled by the
/// environment or defaulting to "info".
///
/// # Errors
///
/// Returns an error if the logger fails to initialize.
pub fn create_stdout_logger() -> Result<flexi_logger::LoggerHandle, Box<dyn std::error::Error>> {
    let logger = Logger::try_with_env_or_str("info")?
        .log_to_stdout()
        .print_message()
        .start()?;
    info!("Logger ready on stdout");
    Ok(logger)
}
