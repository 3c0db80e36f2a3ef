#![forbid(unsafe_code)]

//! `lignee` lays out generation-ordered family trees and describes them as Graphviz DOT.
//!
//! The input is a list of generations, each mapping a person to their children in the next
//! generation. The layout keeps connected lineages together, places co-parents side by side and
//! colors everyone from their ancestry.
//!
//! # Features
//!
//! - `render`: enable layout + DOT output (`lignee::render`)

pub use lignee_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use lignee_layout::{
        DEFAULT_PALETTE, FamilyGraph, LayoutOptions, Lineage, PaletteError, Person, PersonId,
        PersonSummary, Position, layout,
    };
    pub use lignee_render::{DotOptions, render_dot};

    use lignee_core::FamilyData;
    use serde::Deserialize;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] lignee_core::Error),
        #[error(transparent)]
        Palette(#[from] PaletteError),
        #[error(transparent)]
        Render(#[from] lignee_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Layout and emitter options in one object. Both halves are flattened, so a JSON config
    /// reads `{"palette": [...], "nodesep": 0.5, "show_debug_info": false}`.
    #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
    #[serde(default)]
    pub struct RenderOptions {
        #[serde(flatten)]
        pub layout: LayoutOptions,
        #[serde(flatten)]
        pub dot: DotOptions,
    }

    impl RenderOptions {
        pub fn validate(&self) -> Result<()> {
            self.layout.validate()?;
            self.dot.validate()?;
            Ok(())
        }
    }

    /// DOT text together with the laid-out graph it was generated from.
    #[derive(Debug, Clone)]
    pub struct DotOutput {
        pub dot: String,
        pub graph: FamilyGraph,
    }

    pub fn generate_dot(data: &FamilyData, options: &RenderOptions) -> Result<String> {
        Ok(generate_dot_data(data, options)?.dot)
    }

    /// Validates `data` and `options`, lays the tree out and emits its description.
    pub fn generate_dot_data(data: &FamilyData, options: &RenderOptions) -> Result<DotOutput> {
        options.validate()?;
        data.validate()?;
        let graph = layout(&data.children_tree, &options.layout);
        let dot = render_dot(&graph, data.first_year, &options.dot);
        Ok(DotOutput { dot, graph })
    }

    /// Parses a JSON document (`{"first_year": ..., "children_tree": [...]}`) and renders it.
    pub fn generate_dot_from_json(text: &str, options: &RenderOptions) -> Result<String> {
        let data = FamilyData::from_json_str(text)?;
        generate_dot(&data, options)
    }
}
