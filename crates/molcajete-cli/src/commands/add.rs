//! `molcajete add X Y`

use molcajete_core::prelude::*;

/// Add two numbers together.
#[derive(Debug, Default)]
pub struct Add;

impl Command for Add {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().description("Add two numbers together.")
    }

    fn register_arguments(&self, parser: &mut ParserSpec) {
        parser.add_argument(Argument::positional("x").help("the first value"));
        parser.add_argument(Argument::positional("y").help("the second value"));
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        let args = ctx.require_args("add")?;
        let x: i64 = args.parse("x")?.unwrap_or_default();
        let y: i64 = args.parse("y")?.unwrap_or_default();
        match x.checked_add(y) {
            Some(sum) => println!("{x} + {y} = {sum}"),
            None => return Err(MolcajeteError::failed(format!("{x} + {y} overflows"))),
        }
        Ok(Invoked::Continue)
    }
}
