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

use serde::{Deserialize, Serialize};

/// Color of a quad: fully on-category, fully off-category, mixed, or
/// not-yet-written. `Undef` only appears transiently; no quad returned from
/// a completed [`crate::quadtree::QuadTree`] build is ever `Undef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Undef,
    Black,
    White,
    Gray,
}

/// One entry of the linear quadtree: a location code, its level, its color,
/// and the level difference to its neighbor in each of the four cardinal
/// directions (East, North, West, South — matching [`crate::morton::Direction`]).
///
/// `ld[d] == None` means "no neighbor" (outside the conceptual `2^r` square).
/// `ld[d] == Some(0)` means the neighbor is the same size. `ld[d] ==
/// Some(k)` with `k > 0` means the same-level neighbor slot is occupied by a
/// quad `k` levels shallower (bigger). `ld[d] == Some(k)` with `k < 0` means
/// it is subdivided `|k|` levels deeper (smaller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadEntry {
    pub n: u64,
    pub l: u8,
    pub v: Color,
    pub ld: [Option<i8>; 4],
}

impl QuadEntry {
    pub fn new(n: u64, l: u8, v: Color, ld: [Option<i8>; 4]) -> Self {
        Self { n, l, v, ld }
    }
}
