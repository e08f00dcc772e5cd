//! Reporting of errors that escaped a command.

use std::backtrace::BacktraceStatus;
use std::error::Error as _;
use std::io::{self, IsTerminal as _, Write};

use owo_colors::OwoColorize;
use tracing::error;

use molcajete_core::application::{Context, DispatchFailure, Ingredient};
use molcajete_core::error::{MolcajeteError, MolcajeteResult};

/// Prints the failed dispatch with its causes and backtrace, then exits 1.
#[derive(Debug, Default)]
pub struct VerboseCrashHandler {
    color: Option<bool>,
}

impl VerboseCrashHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip TTY detection and always (or never) color the report.
    pub fn with_color(color: bool) -> Self {
        Self { color: Some(color) }
    }

    /// Render the report for `failure`.
    pub fn report(&self, failure: &DispatchFailure, color: bool) -> String {
        let err = failure.error();
        let mut out = String::new();

        if color {
            out.push_str(&format!(
                "{} {}\n",
                "✗".red().bold(),
                err.to_string().red().bold()
            ));
        } else {
            out.push_str(&format!("Error: {err}\n"));
        }

        let mut previous = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            source = cause.source();
            // Wrappers that display their inner error would repeat it.
            let message = cause.to_string();
            if message == previous {
                continue;
            }
            if color {
                out.push_str(&format!("  {} {}\n", "→".dimmed(), cause.to_string().dimmed()));
            } else {
                out.push_str(&format!("  Caused by: {cause}\n"));
            }
            previous = message;
        }

        let suggestions = err.suggestions();
        if !suggestions.is_empty() {
            let header = "Suggestions:";
            if color {
                out.push_str(&format!("{}\n", header.yellow().bold()));
            } else {
                out.push_str(header);
                out.push('\n');
            }
            for suggestion in suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if failure.backtrace().status() == BacktraceStatus::Captured {
            out.push_str(&format!("\nBacktrace:\n{}\n", failure.backtrace()));
        }
        out
    }
}

impl Ingredient for VerboseCrashHandler {
    fn dispatch_failed(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let Some(failure) = ctx.failure.as_ref() else {
            return Ok(());
        };
        error!(
            error = %failure.error(),
            category = ?failure.category(),
            "command crashed"
        );
        let color = self.color.unwrap_or_else(|| io::stderr().is_terminal());
        let report = self.report(failure, color);
        let mut stderr = io::stderr().lock();
        stderr.write_all(report.as_bytes())?;
        stderr.flush()?;
        Err(MolcajeteError::exit(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molcajete_core::error::ErrorContext;

    fn failure() -> DispatchFailure {
        let io: Result<(), io::Error> = Err(io::Error::other("disk full"));
        DispatchFailure::capture(io.context("writing the commit").unwrap_err())
    }

    #[test]
    fn plain_report_lists_the_causes() {
        let report = VerboseCrashHandler::new().report(&failure(), false);
        assert!(report.starts_with("Error: writing the commit\n"));
        assert!(report.contains("Caused by: disk full"));
        assert_eq!(report.matches("writing the commit").count(), 1);
        assert!(!report.contains('\x1b'));
    }

    #[test]
    fn colored_report_uses_escapes() {
        let report = VerboseCrashHandler::new().report(&failure(), true);
        assert!(report.contains('\x1b'));
        assert!(report.contains("disk full"));
    }

    #[test]
    fn crash_requests_exit_one() {
        let mut ctx = Context::new();
        ctx.failure = Some(failure());
        let err = VerboseCrashHandler::with_color(false)
            .dispatch_failed(&mut ctx)
            .unwrap_err();
        assert!(matches!(err, MolcajeteError::ExitRequested { code: 1 }));
    }

    #[test]
    fn nothing_to_report() {
        let mut ctx = Context::new();
        VerboseCrashHandler::new().dispatch_failed(&mut ctx).unwrap();
    }
}
