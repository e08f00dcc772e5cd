//! A fake `git` that keeps a repository session open around its
//! sub-commands.

use molcajete_core::prelude::*;
use tracing::debug;

const SESSION: &str = "git:session";

/// State shared by the `git` sub-commands while the session is open.
#[derive(Debug, Default)]
pub struct Session {
    pub commits: usize,
}

/// A fake git-like command.
#[derive(Debug, Default)]
pub struct Git;

impl Command for Git {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().description("A fake git-like command.")
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        println!("opening repository session");
        ctx.insert(SESSION, Session::default());
        Ok(Invoked::scoped(|ctx| {
            let commits = ctx
                .remove::<Session>(SESSION)
                .map_or(0, |session| session.commits);
            debug!(commits, "closing repository session");
            println!("closing repository session ({commits} new commits)");
            Ok(())
        }))
    }

    fn sub_commands(&self) -> Vec<SubCommand> {
        vec![
            SubCommand::of::<Commit>("commit"),
            SubCommand::of::<Log>("log"),
            SubCommand::of::<Stash>("stash"),
        ]
    }
}

/// The `git commit` command.
#[derive(Debug, Default)]
pub struct Commit;

impl Command for Commit {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("record changes to the repository")
    }

    fn register_arguments(&self, parser: &mut ParserSpec) {
        parser.add_argument(
            Argument::option("message")
                .short('m')
                .metavar("<msg>")
                .help("use given <msg> as the commit message"),
        );
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        let message = ctx
            .require_args("git commit")?
            .get_str("message")
            .unwrap_or("(no message)")
            .to_string();
        if let Some(session) = ctx.get_mut::<Session>(SESSION) {
            session.commits += 1;
        }
        println!("fake git commit: {message}");
        Ok(Invoked::Continue)
    }
}

/// The `git log` command.
#[derive(Debug, Default)]
pub struct Log;

impl Command for Log {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("show commit logs")
    }

    fn register_arguments(&self, parser: &mut ParserSpec) {
        parser.add_argument(
            Argument::option("follow")
                .action(ArgAction::StoreTrue)
                .help("continue listing the history of a file beyond renames"),
        );
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        if ctx.require_args("git log")?.get_flag("follow") {
            println!("fake git log --follow");
        } else {
            println!("fake git log");
        }
        Ok(Invoked::Continue)
    }
}

/// `git stash`, which only groups its own sub-commands.
#[derive(Debug, Default)]
pub struct Stash;

impl Command for Stash {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("stash the changes in a dirty working directory")
    }

    fn sub_commands(&self) -> Vec<SubCommand> {
        vec![SubCommand::of::<StashList>("list")]
    }
}

/// The `git stash list` command.
#[derive(Debug, Default)]
pub struct StashList;

impl Command for StashList {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("list the stash entries")
    }

    fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
        println!("fake git stash list");
        Ok(Invoked::Continue)
    }
}
