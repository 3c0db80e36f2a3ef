#![forbid(unsafe_code)]

//! Layout engine for generation-ordered family trees.
//!
//! The pipeline is pure and rebuilt from scratch for every input:
//! build the person graph, count lineage joins, assign positions (which fixes the horizontal
//! order of every generation), then propagate colors. Final coordinates are left to the
//! renderer consuming the graph description.

mod assign;
mod builder;
pub mod color;
pub mod graph;
mod joins;
pub mod position;
pub mod siblings;

pub use assign::{MERGE_OFFSET_BASE, fan_out_offset};
pub use color::{DEFAULT_PALETTE, LayoutOptions, PaletteError, blend_colors, is_light};
pub use graph::{FamilyGraph, Lineage, Person, PersonId, PersonSummary};
pub use position::{Position, cmp_padded};

use lignee_core::Generation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the full layout pipeline on a validated tree.
pub fn layout(tree: &[Generation], options: &LayoutOptions) -> FamilyGraph {
    let mut graph = FamilyGraph::build(tree);
    graph.count_joins();
    graph.assign_positions();
    graph.propagate_colors(&options.palette);
    graph
}
