//! The command tree of the demonstration application.

pub mod add;
pub mod color;
pub mod fail;
pub mod git;
pub mod logger;
pub mod rainbow;
pub mod terminal;

use molcajete_core::application::ingredients::color::{SPICE_ARGUMENTS, SPICE_ENABLE};
use molcajete_core::prelude::*;
use molcajete_ingredients::logging;

/// The root command. Only dispatches to its sub-commands.
pub struct Molcajete;

impl Command for Molcajete {
    fn info(&self) -> CommandInfo {
        CommandInfo::new()
            .description(
                "Command line applications ground from small ingredients.\n\n\
                 Every sub-command shows off one part of the framework.",
            )
            .epilog("Set MOLCAJETE_COMPLETE=<shell> to print a completion script.")
            .version(molcajete_core::VERSION)
            .spice(SPICE_ARGUMENTS)
            .spice(SPICE_ENABLE)
            .spice(logging::SPICE_ARGUMENTS)
    }

    fn sub_commands(&self) -> Vec<SubCommand> {
        vec![
            SubCommand::of::<add::Add>("add"),
            SubCommand::of::<git::Git>("git"),
            SubCommand::of::<color::Show>("color"),
            SubCommand::of::<color::Palettes>("palettes"),
            SubCommand::of::<terminal::Terminal>("terminal"),
            SubCommand::of::<rainbow::Rainbow>("rainbow"),
            SubCommand::of::<logger::Logger>("logger"),
            SubCommand::of::<fail::Fail>("fail"),
        ]
    }
}
