//! Ingredients that need nothing but the core.
//!
//! Anything touching the environment, the terminal or an argument parser
//! lives in the `molcajete-ingredients` crate.

pub mod cmdtree;
pub mod color;

pub use cmdtree::{CommandTreeBuilder, CommandTreeDispatcher};
pub use color::{ColorIngredient, ColorSettings};
