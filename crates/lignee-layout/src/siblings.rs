//! Ordering of a person's children before they are positioned.
//!
//! Children sharing the exact same non-empty set of children of their own are co-parents and
//! stay together. Groups are laid out as a pyramid: least entangled groups in the middle, most
//! entangled at the edges.

use crate::graph::{FamilyGraph, PersonId};
use rustc_hash::FxHashSet as HashSet;

/// Returns `children` reordered for placement.
pub fn sort_siblings(graph: &FamilyGraph, children: &[PersonId]) -> Vec<PersonId> {
    let mut groups = co_parent_groups(graph, children);

    // Ascending (joins, parents, children) totals; `sort_by_key` is stable.
    groups.sort_by_key(|group| {
        group.iter().fold((0u32, 0usize, 0usize), |acc, &id| {
            let p = &graph[id];
            (
                acc.0 + p.joins,
                acc.1 + p.parents.len(),
                acc.2 + p.children.len(),
            )
        })
    });

    let group_count = groups.len();
    let mut ordered: Vec<PersonId> = Vec::with_capacity(children.len());
    for mut group in groups {
        group.sort_by_key(|&id| (graph[id].parents.len(), graph[id].children.len()));
        if ordered.len() % 2 == 0 {
            ordered.extend(group);
        } else {
            group.extend(ordered);
            ordered = group;
        }
    }

    if group_count % 2 == 1 {
        ordered.reverse();
    }
    ordered
}

/// Partitions `children` into co-parent groups, in order of first appearance.
pub fn co_parent_groups(graph: &FamilyGraph, children: &[PersonId]) -> Vec<Vec<PersonId>> {
    let offspring: Vec<HashSet<&str>> = children
        .iter()
        .map(|&id| graph[id].children.iter().map(|&c| graph[c].name.as_str()).collect())
        .collect();

    let mut grouped = vec![false; children.len()];
    let mut groups: Vec<Vec<PersonId>> = Vec::new();

    for i in 0..children.len() {
        if grouped[i] {
            continue;
        }
        grouped[i] = true;
        let mut group = vec![children[i]];
        if !offspring[i].is_empty() {
            for j in (i + 1)..children.len() {
                if !grouped[j] && offspring[j] == offspring[i] {
                    grouped[j] = true;
                    group.push(children[j]);
                }
            }
        }
        groups.push(group);
    }
    groups
}
