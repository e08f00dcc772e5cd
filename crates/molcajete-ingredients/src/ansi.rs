//! Decides whether the context's ANSI formatter emits escape sequences.

use std::env;
use std::io::IsTerminal as _;

use tracing::debug;

use molcajete_core::application::{Context, Ingredient};
use molcajete_core::domain::AnsiFormatter;
use molcajete_core::error::MolcajeteResult;

/// Enables ANSI output when stdout is a terminal and `NO_COLOR` is unset.
#[derive(Debug, Default)]
pub struct AnsiIngredient {
    forced: Option<bool>,
}

impl AnsiIngredient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip detection and always use `enabled`.
    pub fn forced(enabled: bool) -> Self {
        Self {
            forced: Some(enabled),
        }
    }

    pub fn detect() -> bool {
        env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
            && std::io::stdout().is_terminal()
    }
}

impl Ingredient for AnsiIngredient {
    fn added(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let enabled = self.forced.unwrap_or_else(Self::detect);
        debug!(enabled, "ANSI output");
        ctx.ansi = AnsiFormatter::new(enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_setting_wins() {
        let mut ctx = Context::new();
        AnsiIngredient::forced(true).added(&mut ctx).unwrap();
        assert!(ctx.ansi.is_enabled());
        AnsiIngredient::forced(false).added(&mut ctx).unwrap();
        assert!(!ctx.ansi.is_enabled());
    }
}
