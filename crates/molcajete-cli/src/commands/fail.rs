//! `molcajete fail`: always crashes, to show the crash handler.

use std::io;

use molcajete_core::prelude::*;

#[derive(Debug, Default)]
pub struct Fail;

impl Command for Fail {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("fail on purpose")
    }

    fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
        Err::<(), _>(io::Error::other("the pestle slipped")).context("grinding failed")?;
        Ok(Invoked::Continue)
    }
}
