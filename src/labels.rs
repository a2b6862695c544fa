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

//! Union-find label forest for connected-component assignment.
//!
//! `spec.md` §4.5 describes a forest of singly-linked `Label`/`SubLabel`
//! chains. Per the Design Note in §9 ("classic weighted union-find with path
//! compression over integer indices — semantically equivalent, simpler, and
//! eliminates the `assign`/`make_from` ambiguity of the reference"), this is
//! implemented as a dense-arena weighted union-find instead — the public
//! vocabulary (`new_label`, `make_from`, `assign`, representative ordering
//! by creation index) still matches the spec so call sites at §4.6 read the
//! same.

use std::cmp::Ordering;

/// A handle into a [`LabelForest`]. Two ids compare equal as sets once
/// [`LabelForest::assign`] or a shared [`LabelForest::make_from`] chain has
/// joined them, even though the ids themselves stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(u32);

impl LabelId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct Node {
    parent: u32,
    rank: u8,
    /// Creation order; the spec's `idx`. Representatives are compared by
    /// the `idx` of whichever node currently roots the set, so "the
    /// minimum label" is well defined regardless of which node the union
    /// picked as root.
    idx: u32,
}

/// Arena of union-find nodes, one per connected-components pass
/// (`spec.md` §5: "single-pass, constructed fresh ... and destroyed
/// together").
#[derive(Default)]
pub struct LabelForest {
    nodes: Vec<Node>,
}

impl LabelForest {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a fresh singleton label. `idx` is the caller-supplied
    /// monotone counter from `spec.md` §4.6 (`max_idx`); using a
    /// caller-supplied counter instead of `self.nodes.len()` keeps label
    /// creation order identical to the components pass's own bookkeeping
    /// even if labels are later reassigned across categories.
    pub fn new_label(&mut self, idx: u32) -> LabelId {
        let id = self.nodes.len() as u32;
        self.nodes.push(Node {
            parent: id,
            rank: 0,
            idx,
        });
        LabelId(id)
    }

    /// Allocates a new label in the same set as `id` (a "sub-label" per
    /// `spec.md` §4.5's `make_from`).
    pub fn make_from(&mut self, id: LabelId) -> LabelId {
        let representative = self.find(id);
        let idx = self.nodes[representative.index()].idx;
        let new_id = self.nodes.len() as u32;
        self.nodes.push(Node {
            parent: representative.0,
            rank: 0,
            idx,
        });
        LabelId(new_id)
    }

    /// Representative of `id`'s set, with path compression.
    pub fn find(&mut self, id: LabelId) -> LabelId {
        let mut current = id.0;
        while self.nodes[current as usize].parent != current {
            let grandparent = self.nodes[self.nodes[current as usize].parent as usize].parent;
            self.nodes[current as usize].parent = grandparent;
            current = grandparent;
        }
        LabelId(current)
    }

    /// Unions the sets containing `a` and `b` (union by rank). A no-op if
    /// they already share a representative.
    pub fn assign(&mut self, a: LabelId, b: LabelId) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (winner, loser) = match self.nodes[ra.index()].rank.cmp(&self.nodes[rb.index()].rank)
        {
            Ordering::Less => (rb, ra),
            Ordering::Greater => (ra, rb),
            Ordering::Equal => {
                self.nodes[ra.index()].rank += 1;
                (ra, rb)
            }
        };
        self.nodes[loser.index()].parent = winner.0;
    }

    /// Creation-order index of `id`'s representative — the spec's `idx`,
    /// used to compute "the minimum label" among a set of candidates.
    pub fn representative_idx(&mut self, id: LabelId) -> u32 {
        let representative = self.find(id);
        self.nodes[representative.index()].idx
    }
}
