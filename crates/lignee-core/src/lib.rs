#![forbid(unsafe_code)]

//! Family tree input model (headless).
//!
//! A tree is an ordered list of generations; each generation maps a person name to the names of
//! their children in the next generation. This crate owns loading, validation and the naming
//! rules. Layout lives in `lignee-layout`, DOT output in `lignee-render`.

pub mod error;
pub mod model;
pub mod naming;
mod ordinal;

pub use error::{Error, Result};
pub use model::{FamilyData, Generation, PersonData, validate};
pub use naming::{RuleViolation, check_name, check_title};
pub use ordinal::ordinal_fr;
