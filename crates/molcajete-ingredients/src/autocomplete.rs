//! Shell completion scripts, generated from the full parser.

use std::env;
use std::io::{self, Write};

use clap::ValueEnum as _;
use clap_complete::{Shell, generate};
use tracing::debug;

use molcajete_core::application::{Context, Ingredient};
use molcajete_core::error::{MolcajeteError, MolcajeteResult};

use crate::parser::to_clap;

/// Environment variable naming the shell to print a completion script for.
pub const COMPLETE_ENV: &str = "MOLCAJETE_COMPLETE";

/// Prints a completion script and exits when [`COMPLETE_ENV`] is set.
///
/// Runs in the `parse` phase, so it has to come before the parser ingredient
/// in the recipe.
#[derive(Debug, Default)]
pub struct AutocompleteIngredient {
    shell: Option<String>,
}

impl AutocompleteIngredient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `shell` instead of reading [`COMPLETE_ENV`].
    pub fn for_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }

    /// Write the completion script for `shell` to `out`.
    pub fn write_script(
        &self,
        ctx: &Context,
        shell: Shell,
        out: &mut dyn Write,
    ) -> MolcajeteResult<()> {
        let mut command = to_clap(ctx.require_parser("AutocompleteIngredient")?);
        let bin = command.get_name().to_string();
        generate(shell, &mut command, bin, out);
        Ok(())
    }
}

impl Ingredient for AutocompleteIngredient {
    fn parse(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let Some(requested) = self.shell.clone().or_else(|| env::var(COMPLETE_ENV).ok()) else {
            return Ok(());
        };
        let Ok(shell) = requested.parse::<Shell>() else {
            // The log subscriber is only installed in late_init.
            eprintln!("{}", unsupported_shell(&requested));
            return Ok(());
        };
        debug!(%shell, "printing completion script");
        let mut stdout = io::stdout().lock();
        self.write_script(ctx, shell, &mut stdout)?;
        stdout.flush()?;
        Err(MolcajeteError::exit(0))
    }
}

fn unsupported_shell(requested: &str) -> String {
    let supported = Shell::value_variants()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("warning: no completion support for shell '{requested}' (supported: {supported})")
}
