//! `molcajete logger`: one event per level, interleaved with plain output.

use molcajete_core::prelude::*;
use tracing::{debug, error, info, warn};

/// Experiment with the logging subsystem.
#[derive(Debug, Default)]
pub struct Logger;

impl Command for Logger {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().description(
            "Experiment with the logging subsystem.\n\n\
             Try it with --log-level DEBUG or -T molcajete.",
        )
    }

    fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
        debug!("Some debugging message");
        println!("Just a normal print!");
        info!("Some informational message");
        println!("Just a normal print!");
        warn!("Some warning message");
        println!("Just a normal print!");
        error!("Some error message");
        println!("Just a normal print!");
        Ok(Invoked::Continue)
    }
}
