//! Commands: the units of application logic that make up the command tree.

use std::collections::BTreeSet;
use std::fmt;

use crate::application::Context;
use crate::domain::ParserSpec;
use crate::error::MolcajeteResult;

/// Teardown half of a scoped command; runs after every descendant finished.
pub type Teardown = Box<dyn FnOnce(&mut Context) -> MolcajeteResult<()>>;

/// What a command wants the dispatcher to do after it ran.
pub enum Invoked {
    /// Fall through to the selected sub-command, if any.
    Continue,
    /// Stop here and exit with this status.
    Exit(u8),
    /// Setup already happened inside `invoked`; dispatch the sub-commands,
    /// then run the teardown even if they failed.
    Scoped(Teardown),
    /// The command kept the default [`Command::invoked`]. Dispatch falls
    /// through as with [`Continue`](Invoked::Continue); a command without
    /// sub-commands gets a warning.
    Unimplemented,
}

impl Invoked {
    /// Wrap the sub-command dispatch in `teardown`.
    pub fn scoped(teardown: impl FnOnce(&mut Context) -> MolcajeteResult<()> + 'static) -> Self {
        Self::Scoped(Box::new(teardown))
    }
}

impl fmt::Debug for Invoked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => f.write_str("Continue"),
            Self::Exit(code) => f.debug_tuple("Exit").field(code).finish(),
            Self::Scoped(_) => f.write_str("Scoped(..)"),
            Self::Unimplemented => f.write_str("Unimplemented"),
        }
    }
}

// ── CommandInfo ──────────────────────────────────────────────────────────────

/// Metadata describing a command in help output and in the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: Option<String>,
    pub help: Option<String>,
    pub description: Option<String>,
    pub epilog: Option<String>,
    pub usage: Option<String>,
    pub version: Option<String>,
    /// Message catalog the help text belongs to.
    pub gettext_domain: Option<String>,
    pub spices: BTreeSet<String>,
}

impl CommandInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
        self.epilog = Some(epilog.into());
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn gettext_domain(mut self, domain: impl Into<String>) -> Self {
        self.gettext_domain = Some(domain.into());
        self
    }

    pub fn spice(mut self, spice: impl Into<String>) -> Self {
        self.spices.insert(spice.into());
        self
    }

    /// Short help, falling back to the first line of the description.
    pub fn effective_help(&self) -> Option<String> {
        self.help.clone().or_else(|| {
            self.description
                .as_deref()
                .and_then(|d| d.lines().map(str::trim).find(|line| !line.is_empty()))
                .map(str::to_string)
        })
    }
}

// ── Sub-commands ─────────────────────────────────────────────────────────────

/// Where a sub-command comes from.
pub enum CommandSource {
    /// Already constructed; used as is.
    Instance(Box<dyn Command>),
    /// Constructed once, when the tree is built.
    Factory(Box<dyn FnOnce() -> Box<dyn Command>>),
}

impl CommandSource {
    pub fn instantiate(self) -> Box<dyn Command> {
        match self {
            Self::Instance(command) => command,
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// A declared child of a command.
#[derive(Debug)]
pub struct SubCommand {
    /// Overrides the child's own name when set.
    pub name: Option<String>,
    pub source: CommandSource,
}

impl SubCommand {
    /// Declare `T` as a sub-command named `name`, built with `Default`.
    pub fn of<T>(name: impl Into<String>) -> Self
    where
        T: Command + Default + 'static,
    {
        Self {
            name: Some(name.into()),
            source: CommandSource::Factory(Box::new(|| Box::new(T::default()))),
        }
    }

    /// Declare an existing command instance as a sub-command.
    pub fn instance(name: impl Into<String>, command: impl Command + 'static) -> Self {
        Self {
            name: Some(name.into()),
            source: CommandSource::Instance(Box::new(command)),
        }
    }

    /// Declare a sub-command that keeps its self-reported name.
    pub fn unnamed(command: impl Command + 'static) -> Self {
        Self {
            name: None,
            source: CommandSource::Instance(Box::new(command)),
        }
    }
}

// ── Command ──────────────────────────────────────────────────────────────────

/// A command or sub-command of the application.
///
/// Override [`invoked`](Command::invoked) for the logic,
/// [`register_arguments`](Command::register_arguments) for the arguments and
/// [`sub_commands`](Command::sub_commands) to nest further commands.
#[cfg_attr(test, mockall::automock)]
pub trait Command {
    fn info(&self) -> CommandInfo {
        CommandInfo::default()
    }

    /// Run the command.
    ///
    /// Commands with sub-commands usually return [`Invoked::Continue`] so the
    /// selected child runs next.
    fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
        Ok(Invoked::Unimplemented)
    }

    fn register_arguments(&self, _parser: &mut ParserSpec) {}

    /// Children of this command. Called once, when the tree is built.
    fn sub_commands(&self) -> Vec<SubCommand> {
        Vec::new()
    }
}
