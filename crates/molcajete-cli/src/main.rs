//! # Molcajete
//!
//! Demonstration application for the Molcajete command line framework.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` and the configuration (file + env + defaults).
//! 2. Build the [`CommandRecipe`] around the [`Molcajete`] command tree.
//! 3. Let the pipeline parse arguments, set up logging and colors and
//!    dispatch the selected command.
//! 4. Turn the outcome into an exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                        |
//! |------|--------------------------------|
//! |  0   | Success                        |
//! |  1   | Command failure                |
//! |  2   | Usage error                    |
//! |  4   | Configuration error            |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use owo_colors::OwoColorize;
use tracing::error;

use molcajete_core::prelude::Recipe;
use molcajete_ingredients::CommandRecipe;

use crate::{commands::Molcajete, config::AppConfig};

mod commands;
mod config;

fn main() -> ExitCode {
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    let config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => return config_error(&e),
    };
    let log_level = match config.log_level() {
        Ok(level) => level,
        Err(e) => return config_error(&e),
    };

    let recipe = CommandRecipe::new(Molcajete)
        .prog("molcajete")
        .with_default_log_level(log_level)
        .with_color_settings(config.color);
    ExitCode::from(recipe.main(None))
}

/// Report a configuration problem before the pipeline (and its logging)
/// exists.
fn config_error(err: &anyhow::Error) -> ExitCode {
    error!(error = %err, "failed to load configuration");
    let msg = if std::io::stderr().is_terminal() {
        format_colored(err)
    } else {
        format_plain(err)
    };
    eprint!("{msg}");
    ExitCode::from(4)
}

fn format_colored(err: &anyhow::Error) -> String {
    let mut out = format!("{} {}\n", "✗ Error:".red().bold(), err.red());
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  {} {}\n", "→".dimmed(), cause.dimmed()));
    }
    out.push_str(&format!(
        "{}\n  Check {} or unset {}\n",
        "Suggestions:".yellow().bold(),
        AppConfig::config_path().display(),
        config::CONFIG_ENV
    ));
    out
}

fn format_plain(err: &anyhow::Error) -> String {
    let mut out = format!("Error: {err}\n");
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  Caused by: {cause}\n"));
    }
    out.push_str(&format!(
        "Suggestions:\n  Check {} or unset {}\n",
        AppConfig::config_path().display(),
        config::CONFIG_ENV
    ));
    out
}

// ── tests ─────────────────────────────────────────────────────────────────────
