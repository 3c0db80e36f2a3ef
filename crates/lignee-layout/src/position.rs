//! Lineage ordering keys.
//!
//! A position is a non-empty list of signed components: the first is the lineage ("tree") id,
//! the rest are nested offsets around the parent. Positions are compared lexicographically with
//! missing trailing components read as `0`, so `[1]` sorts between `[1, -1]` and `[1, 1]`.

use serde::Serialize;
use smallvec::{SmallVec, smallvec};
use std::cmp::Ordering;

type Components = SmallVec<[i64; 8]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Position(Components);

impl Position {
    /// Position of a person starting a new lineage.
    pub fn root(tree_id: i64) -> Self {
        Self(smallvec![tree_id])
    }

    pub fn new(tree_id: i64, rest: &[i64]) -> Self {
        let mut components: Components = smallvec![tree_id];
        components.extend_from_slice(rest);
        Self(components)
    }

    pub fn tree_id(&self) -> i64 {
        self.0[0]
    }

    pub fn set_tree_id(&mut self, tree_id: i64) {
        self.0[0] = tree_id;
    }

    /// The innermost component (the tree id for a root).
    pub fn last(&self) -> i64 {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a position holds at least its tree id.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn push(&mut self, component: i64) {
        self.0.push(component);
    }

    /// A copy of this position nested one level deeper.
    pub fn with_component(&self, component: i64) -> Self {
        let mut out = self.clone();
        out.push(component);
        out
    }

    /// Moves the innermost component one step away from zero (`0` counts as positive).
    pub fn bump_last(&mut self) {
        let last = self.0.len() - 1;
        if self.0[last] >= 0 {
            self.0[last] += 1;
        } else {
            self.0[last] -= 1;
        }
    }

    /// Re-roots this position under `anchor`: `[anchor.tree, offset, anchor[1..], self[1..]]`,
    /// with this position's own offsets negated when `mirror` is set.
    pub fn rebased(&self, anchor: &Self, offset: i64, mirror: bool) -> Self {
        let mut components: Components = smallvec![anchor.tree_id(), offset];
        components.extend_from_slice(&anchor.0[1..]);
        if mirror {
            components.extend(self.0[1..].iter().map(|c| -c));
        } else {
            components.extend_from_slice(&self.0[1..]);
        }
        Self(components)
    }

    pub fn cmp_padded(&self, other: &Self) -> Ordering {
        cmp_padded(&self.0, &other.0)
    }
}

/// Lexicographic comparison where the shorter slice is padded with zeros.
pub fn cmp_padded(a: &[i64], b: &[i64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}
