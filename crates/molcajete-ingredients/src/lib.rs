//! Ingredients that talk to the outside world.
//!
//! `molcajete-core` defines the pipeline and keeps to pure logic. The
//! ingredients here do the I/O: parsing `argv` with clap, installing the
//! tracing subscriber, reading the terminal environment and printing crash
//! reports and completion scripts.
//!
//! Most applications only need [`CommandRecipe`].

pub mod ansi;
pub mod autocomplete;
pub mod crash;
pub mod logging;
pub mod parser;
pub mod recipe;
pub mod terminal;

// Re-export commonly used ingredients
pub use ansi::AnsiIngredient;
pub use autocomplete::AutocompleteIngredient;
pub use crash::VerboseCrashHandler;
pub use logging::{LogLevel, LoggingIngredient};
pub use parser::ParserIngredient;
pub use recipe::CommandRecipe;
pub use terminal::{TerminalEnv, TerminalIngredient};
