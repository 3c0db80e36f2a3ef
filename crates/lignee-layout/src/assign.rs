//! Position assignment.
//!
//! Bands are walked top to bottom. Each person places their not-yet-positioned children around
//! their own position; people that no positioned parent reached start a new lineage. When a
//! child turns out to have a parent from another lineage, that whole lineage is re-rooted under
//! the child's position. Tree ids are finally re-ranked by lineage size.

use crate::graph::{FamilyGraph, PersonId};
use crate::position::Position;
use crate::siblings::sort_siblings;
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Reverse;

/// Base of the second component given to a re-rooted lineage. Ordinary offsets are bounded by
/// a person's number of children and never get close.
pub const MERGE_OFFSET_BASE: i64 = 1000;

impl FamilyGraph {
    pub fn assign_positions(&mut self) {
        if self.generations.is_empty() {
            return;
        }

        let mut next_tree: i64 = 0;
        self.start_lineages(0, &mut next_tree);

        for band in 0..self.generations.len() {
            self.sort_generation(band);
            let members = self.generations[band].clone();
            for person in members {
                self.place_children(person, band);
            }
            if band + 1 < self.generations.len() {
                self.start_lineages(band + 1, &mut next_tree);
            }
        }

        self.rank_trees();
        for band in 0..self.generations.len() {
            self.sort_generation(band);
        }
    }

    /// Gives a fresh tree id to every unpositioned person of `band`, most children first.
    fn start_lineages(&mut self, band: usize, next_tree: &mut i64) {
        let mut members = self.generations[band].clone();
        members.sort_by_key(|&id| Reverse(self[id].children.len()));
        for id in members {
            if self[id].position.is_none() {
                tracing::trace!(person = %self[id].name, band, tree = *next_tree, "new lineage");
                self[id].position = Some(Position::root(*next_tree));
                *next_tree += 1;
            }
        }
    }

    fn place_children(&mut self, person: PersonId, band: usize) {
        let Some(anchor) = self[person].position.clone() else {
            return;
        };
        let children = self[person].children.clone();
        let ordered = sort_siblings(self, &children);
        let same_side = children.iter().any(|&c| self[c].position.is_some());
        let lone = children.len() == 1;
        let count = ordered.len() as i64;
        let side = anchor.last();

        for (i, &child) in ordered.iter().enumerate() {
            if self[child].position.is_some() {
                continue;
            }
            let i = i as i64;
            let position = if lone {
                anchor.clone()
            } else if same_side {
                let offset = if side < 0 { side - 1 - i } else { side + 1 + i };
                anchor.with_component(offset)
            } else {
                anchor.with_component(fan_out_offset(i, count, side))
            };
            self[child].position = Some(position);

            let parents = self[child].parents.clone();
            for other in parents {
                if other != person {
                    self.merge_lineage(child, other, band);
                }
            }
        }
    }

    /// Re-roots the lineage of `other` (a second parent of `child`) under `child`'s position.
    fn merge_lineage(&mut self, child: PersonId, other: PersonId, band: usize) {
        let (Some(mut joined), Some(other_position)) =
            (self[child].position.clone(), self[other].position.clone())
        else {
            return;
        };
        if joined.tree_id() == other_position.tree_id() {
            return;
        }

        if joined.len() == 1 {
            joined.push(1);
        }
        joined.bump_last();
        self[child].position = Some(joined.clone());

        let absorbed = other_position.tree_id();
        let mirror = (other_position.last() > 0) == (joined.last() > 0);
        let mut offset = MERGE_OFFSET_BASE + band as i64;
        if joined.last() <= 0 {
            offset = -offset;
        }

        tracing::debug!(
            child = %self[child].name,
            parent = %self[other].name,
            band,
            from_tree = absorbed,
            into_tree = joined.tree_id(),
            mirror,
            "merging lineages"
        );

        for (idx, p) in self.people.iter_mut().enumerate() {
            if idx == child.index() {
                continue;
            }
            let Some(position) = p.position.as_ref() else {
                continue;
            };
            if position.tree_id() == absorbed {
                p.position = Some(position.rebased(&joined, offset, mirror));
            }
        }
    }

    /// Renumbers tree ids by descending lineage size (0 = biggest); ties keep first appearance.
    fn rank_trees(&mut self) {
        let mut sizes: Vec<(i64, usize)> = self.tree_sizes().into_iter().collect();
        sizes.sort_by_key(|&(_, size)| Reverse(size));
        let rank: HashMap<i64, i64> = sizes
            .iter()
            .enumerate()
            .map(|(rank, &(tree, _))| (tree, rank as i64))
            .collect();

        tracing::debug!(trees = sizes.len(), ?sizes, "ranked lineages");

        for p in &mut self.people {
            if let Some(position) = p.position.as_mut() {
                if let Some(&r) = rank.get(&position.tree_id()) {
                    position.set_tree_id(r);
                }
            }
        }
    }
}

/// Offset of the `index`-th of `count` children placed around a parent whose innermost
/// component is `side`: `-k..=-1, 1..=k` (zero skipped), mirrored when `side` is positive.
pub fn fan_out_offset(index: i64, count: i64, side: i64) -> i64 {
    let mut offset = index - (count + 1) / 2;
    if offset >= 0 {
        offset += 1;
    }
    if side > 0 { -offset } else { offset }
}
