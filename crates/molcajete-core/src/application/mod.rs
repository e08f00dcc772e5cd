//! Application layer for Molcajete.
//!
//! This layer contains:
//! - **Pipeline**: [`Context`], the [`Ingredient`] trait and the [`Bowl`]
//!   that runs ingredients through their lifecycle
//! - **Commands**: the [`Command`] trait, the command tree and the dispatcher
//! - **Ingredients**: the ones that need nothing but the core
//! - **Recipes**: ready-made ingredient lists
//!
//! All color and argument rules live in `crate::domain`.

pub mod bowl;
pub mod cmdtree;
pub mod command;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod ingredient;
pub mod ingredients;
pub mod recipe;

pub use bowl::Bowl;
pub use cmdtree::{CommandTreeNode, build_cmd_tree};
pub use command::{Command, CommandInfo, CommandSource, Invoked, SubCommand, Teardown};
pub use context::{Context, DispatchFailure};
pub use dispatcher::dispatch_chain;
pub use error::ApplicationError;
pub use ingredient::{Ingredient, Phase};
pub use recipe::{Recipe, exit_status};

#[cfg(test)]
pub use command::MockCommand;
#[cfg(test)]
pub use ingredient::MockIngredient;
