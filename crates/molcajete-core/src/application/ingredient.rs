//! The ingredient trait and the lifecycle phases it hooks into.

use std::fmt;

use crate::application::Context;
use crate::error::MolcajeteResult;

/// A composable piece of a command line application.
///
/// Every hook defaults to a no-op, so an ingredient only implements the
/// phases it cares about. The [`Bowl`](crate::application::Bowl) calls the
/// hooks in this order:
///
/// ```text
/// added → build_early_parser → preparse → early_init → build_parser
///       → parse → late_init → dispatch → dispatch_succeeded | dispatch_failed
///       → shutdown
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Ingredient {
    /// The ingredient joined the bowl and the context exists.
    fn added(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Create the parser used before the real one can be built.
    fn build_early_parser(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Run the early parser over `ctx.argv`.
    fn preparse(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Initialize whatever only needs the early arguments.
    fn early_init(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Create the full parser.
    fn build_parser(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Run the full parser over `ctx.argv`.
    fn parse(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Initialize whatever needs the parsed arguments.
    fn late_init(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Run the application. The first ingredient returning `Some` ends the
    /// dispatch phase and provides the exit status.
    fn dispatch(&mut self, _ctx: &mut Context) -> MolcajeteResult<Option<u8>> {
        Ok(None)
    }

    fn dispatch_succeeded(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Dispatch failed; the error is in `ctx.failure`.
    fn dispatch_failed(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }

    /// Last chance to release resources.
    fn shutdown(&mut self, _ctx: &mut Context) -> MolcajeteResult<()> {
        Ok(())
    }
}

/// Every lifecycle phase except dispatch itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Added,
    BuildEarlyParser,
    Preparse,
    EarlyInit,
    BuildParser,
    Parse,
    LateInit,
    DispatchSucceeded,
    DispatchFailed,
    Shutdown,
}

impl Phase {
    /// Phases run before dispatch, in order.
    pub const STARTUP: [Phase; 7] = [
        Phase::Added,
        Phase::BuildEarlyParser,
        Phase::Preparse,
        Phase::EarlyInit,
        Phase::BuildParser,
        Phase::Parse,
        Phase::LateInit,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::BuildEarlyParser => "build_early_parser",
            Self::Preparse => "preparse",
            Self::EarlyInit => "early_init",
            Self::BuildParser => "build_parser",
            Self::Parse => "parse",
            Self::LateInit => "late_init",
            Self::DispatchSucceeded => "dispatch_succeeded",
            Self::DispatchFailed => "dispatch_failed",
            Self::Shutdown => "shutdown",
        }
    }

    /// Call the hook of `ingredient` that belongs to this phase.
    pub fn apply(self, ingredient: &mut dyn Ingredient, ctx: &mut Context) -> MolcajeteResult<()> {
        match self {
            Self::Added => ingredient.added(ctx),
            Self::BuildEarlyParser => ingredient.build_early_parser(ctx),
            Self::Preparse => ingredient.preparse(ctx),
            Self::EarlyInit => ingredient.early_init(ctx),
            Self::BuildParser => ingredient.build_parser(ctx),
            Self::Parse => ingredient.parse(ctx),
            Self::LateInit => ingredient.late_init(ctx),
            Self::DispatchSucceeded => ingredient.dispatch_succeeded(ctx),
            Self::DispatchFailed => ingredient.dispatch_failed(ctx),
            Self::Shutdown => ingredient.shutdown(ctx),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
