//! Tracing subscriber initialisation.
//!
//! Library code only *emits* spans and events; this ingredient is the one
//! place that installs a subscriber.
//!
//! # Level mapping
//!
//! | `--log-level` | Filter level |
//! |---------------|--------------|
//! | CRITICAL      | ERROR        |
//! | ERROR         | ERROR        |
//! | WARNING       | WARN         |
//! | INFO          | INFO         |
//! | DEBUG         | DEBUG        |
//!
//! Every `-T NAME` adds a `NAME=trace` directive. `RUST_LOG` overrides all of
//! the above if set.

use std::io::IsTerminal as _;
use std::str::FromStr;

use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use molcajete_core::application::{Context, Ingredient};
use molcajete_core::domain::{ArgAction, Argument, DomainError};
use molcajete_core::error::MolcajeteResult;

/// Spice exposing the logging flags.
pub const SPICE_ARGUMENTS: &str = "log:arguments";

const GROUP: &str = "Logging and debugging";

/// Level names accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Critical,
    Error,
    #[default]
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// The tracing filter directive for this level.
    pub const fn directive(&self) -> &'static str {
        match self {
            Self::Critical | Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::InvalidArgumentValue {
                dest: "log_level".into(),
                value: s.to_string(),
                reason: "expected one of CRITICAL, ERROR, WARNING, INFO, DEBUG".into(),
            })
    }
}

/// Installs a `tracing-subscriber` registry writing to stderr.
#[derive(Debug, Default)]
pub struct LoggingIngredient {
    default_level: LogLevel,
}

impl LoggingIngredient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_level(level: LogLevel) -> Self {
        Self {
            default_level: level,
        }
    }

    /// Filter directives for `level` plus one trace directive per target.
    pub fn directives(level: LogLevel, trace: &[String]) -> String {
        std::iter::once(level.directive().to_string())
            .chain(trace.iter().map(|target| format!("{target}=trace")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Ingredient for LoggingIngredient {
    fn build_parser(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        if !ctx.has_spice(SPICE_ARGUMENTS) {
            return Ok(());
        }
        let default = self.default_level.as_str();
        let parser = ctx.require_parser_mut("LoggingIngredient")?;
        parser.add_argument(
            Argument::option("log_level")
                .short('l')
                .metavar("LEVEL")
                .choices(LogLevel::ALL.map(|level| level.as_str()))
                .default_value(default)
                .help("set the logging level")
                .group(GROUP),
        );
        parser.add_argument(
            Argument::option("trace")
                .short('T')
                .metavar("NAME")
                .action(ArgAction::Append)
                .help("enable tracing on the specified target")
                .group(GROUP),
        );
        Ok(())
    }

    fn late_init(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let (level, trace) = match ctx.args.as_ref() {
            Some(args) if ctx.has_spice(SPICE_ARGUMENTS) => (
                args.parse::<LogLevel>("log_level")?
                    .unwrap_or(self.default_level),
                args.get_many("trace").to_vec(),
            ),
            _ => (self.default_level, Vec::new()),
        };
        ctx.insert("log:level", level);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Self::directives(level, &trace)));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(!trace.is_empty())
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr);

        // A subscriber may already be installed (tests, embedding apps).
        if let Err(e) = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
        {
            debug!(error = %e, "tracing subscriber already installed");
        }
        Ok(())
    }
}
