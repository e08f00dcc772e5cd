//! Molcajete Core - the framework behind molcajete command line applications.
//!
//! An application is a recipe: an ordered list of ingredients that a bowl
//! runs through a fixed lifecycle. One of those ingredients dispatches the
//! command tree, the others parse arguments, configure colors, set up
//! logging or report crashes.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          molcajete-cli (demo)           │
//! │        (Commands and a recipe)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         molcajete-ingredients           │
//! │  (clap parser, logging, terminal, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implements
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           Application Layer             │
//! │ (Bowl, Ingredient, Command, dispatcher) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (colors, ANSI, terminals, arguments)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use molcajete_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Hello;
//!
//! impl Command for Hello {
//!     fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
//!         Ok(Invoked::Exit(7))
//!     }
//! }
//!
//! let mut bowl = Bowl::new(vec![
//!     Box::new(CommandTreeBuilder::new(Hello)),
//!     Box::new(CommandTreeDispatcher::new()),
//! ]);
//! assert_eq!(bowl.eat(Some(Vec::new())).unwrap(), Some(7));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what applications and ingredient crates should use
pub mod prelude {
    pub use crate::application::ingredients::{
        ColorIngredient, ColorSettings, CommandTreeBuilder, CommandTreeDispatcher,
    };
    pub use crate::application::{
        Bowl, Command, CommandInfo, Context, Ingredient, Invoked, Recipe, SubCommand,
    };
    pub use crate::domain::{
        ArgAction, Argument, Color, ColorController, NamedColor, ParsedArgs, ParserSpec, Rgb,
        Style, TextStyle,
    };
    pub use crate::error::{ErrorContext, MolcajeteError, MolcajeteResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
