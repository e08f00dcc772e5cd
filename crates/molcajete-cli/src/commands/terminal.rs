//! `molcajete terminal`: what was detected about the terminal.

use molcajete_core::domain::TerminalFeature;
use molcajete_core::prelude::*;

#[derive(Debug, Default)]
pub struct Terminal;

impl Command for Terminal {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("show the detected terminal and its features")
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        let Some(info) = ctx.terminal.as_ref() else {
            println!("terminal: unknown");
            return Ok(Invoked::Continue);
        };
        println!("terminal: {}", info.slug);
        println!("version: {}", info.version.as_deref().unwrap_or("unknown"));
        println!("preset: {}", info.preset);
        println!("ansi: {}", if ctx.ansi.is_enabled() { "enabled" } else { "disabled" });
        for feature in TerminalFeature::ALL {
            println!("  {:<28} {}", feature.as_str(), info.status(feature));
        }
        Ok(Invoked::Continue)
    }
}
