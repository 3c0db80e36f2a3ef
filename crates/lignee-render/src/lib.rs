#![forbid(unsafe_code)]

//! Graphviz DOT description of a laid-out [`FamilyGraph`](lignee_layout::FamilyGraph).
//!
//! The emitter only encodes order and grouping: generations become `rank=same` blocks, the
//! assigned left-to-right order becomes invisible ordering edges, and Graphviz computes the
//! final coordinates.

mod dot;
mod util;

pub use dot::{render_dot, title_pen_width};

use serde::Deserialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("nodesep must be a finite, non-negative number (got {value})")]
    InvalidNodesep { value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DotOptions {
    /// Graph-level `nodesep`, in inches.
    pub nodesep: f64,
    /// Replaces titles with the position vector and join count of each person.
    pub show_debug_info: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            nodesep: 0.5,
            show_debug_info: false,
        }
    }
}

impl DotOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.nodesep.is_finite() || self.nodesep < 0.0 {
            return Err(Error::InvalidNodesep {
                value: self.nodesep,
            });
        }
        Ok(())
    }
}
