//! Recursive dispatch along the selected path of the command tree.

use tracing::{debug, instrument, warn};

use crate::application::{CommandTreeNode, Context, Invoked};
use crate::error::MolcajeteResult;

/// Invoke the commands in `chain` from the root down.
///
/// `chain[0]` is the root and every following node is the child the user
/// selected at that level. Dispatch stops at the first command returning
/// [`Invoked::Exit`] or at the end of the chain. A scoped command gets its
/// teardown called after its descendants, even when one of them failed.
#[instrument(level = "debug", skip_all, fields(depth = chain.len()))]
pub fn dispatch_chain(chain: &[&CommandTreeNode], ctx: &mut Context) -> MolcajeteResult<Option<u8>> {
    dispatch_level(chain, 0, ctx)
}

fn dispatch_level(
    chain: &[&CommandTreeNode],
    level: usize,
    ctx: &mut Context,
) -> MolcajeteResult<Option<u8>> {
    let Some(node) = chain.get(level) else {
        return Ok(None);
    };
    let name = node.name.as_deref().unwrap_or("<root>");
    debug!(level, command = name, "invoking command");

    match node.command.invoked(ctx)? {
        Invoked::Continue => dispatch_level(chain, level + 1, ctx),
        Invoked::Unimplemented => {
            if node.children.is_empty() {
                warn!(command = name, "command doesn't override Command::invoked()");
            }
            dispatch_level(chain, level + 1, ctx)
        }
        Invoked::Exit(code) => {
            debug!(level, command = name, code, "command ended dispatch");
            Ok(Some(code))
        }
        Invoked::Scoped(teardown) => {
            let body = dispatch_level(chain, level + 1, ctx);
            let cleanup = teardown(ctx);
            match (body, cleanup) {
                (Ok(result), Ok(())) => Ok(result),
                (Ok(_), Err(e)) => Err(e),
                (Err(e), Ok(())) => Err(e),
                (Err(e), Err(teardown_error)) => {
                    warn!(
                        command = name,
                        error = %teardown_error,
                        "teardown failed while unwinding from a sub-command error"
                    );
                    Err(e)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Command, CommandSource, SubCommand, build_cmd_tree};
    use crate::error::MolcajeteError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    #[derive(Clone, Copy)]
    enum Behavior {
        Continue,
        Exit(u8),
        Fail,
        Scoped,
        ScopedFailingTeardown,
    }

    struct Recorder {
        label: &'static str,
        behavior: Behavior,
        journal: Journal,
        children: Vec<(&'static str, Behavior)>,
    }

    impl Recorder {
        fn new(label: &'static str, behavior: Behavior, journal: &Journal) -> Self {
            Self {
                label,
                behavior,
                journal: Rc::clone(journal),
                children: Vec::new(),
            }
        }

        fn child(mut self, label: &'static str, behavior: Behavior) -> Self {
            self.children.push((label, behavior));
            self
        }

        fn log(&self, event: &str) {
            self.journal.borrow_mut().push(format!("{} {event}", self.label));
        }
    }

    impl Command for Recorder {
        fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
            self.log("invoked");
            match self.behavior {
                Behavior::Continue => Ok(Invoked::Continue),
                Behavior::Exit(code) => Ok(Invoked::Exit(code)),
                Behavior::Fail => Err(MolcajeteError::failed(format!("{} failed", self.label))),
                Behavior::Scoped | Behavior::ScopedFailingTeardown => {
                    self.log("setup");
                    let journal = Rc::clone(&self.journal);
                    let label = self.label;
                    let fail = matches!(self.behavior, Behavior::ScopedFailingTeardown);
                    Ok(Invoked::scoped(move |_| {
                        journal.borrow_mut().push(format!("{label} teardown"));
                        if fail {
                            Err(MolcajeteError::failed("teardown failed"))
                        } else {
                            Ok(())
                        }
                    }))
                }
            }
        }

        fn sub_commands(&self) -> Vec<SubCommand> {
            self.children
                .iter()
                .map(|&(label, behavior)| {
                    SubCommand::instance(label, Recorder::new(label, behavior, &self.journal))
                })
                .collect()
        }
    }

    fn run(root: Recorder, selection: &[usize]) -> MolcajeteResult<Option<u8>> {
        let tree = build_cmd_tree(CommandSource::Instance(Box::new(root)), None);
        let chain = tree.select(selection).unwrap();
        dispatch_chain(&chain, &mut Context::new())
    }

    fn journal() -> Journal {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn falls_through_to_selected_child() {
        let j = journal();
        let root = Recorder::new("root", Behavior::Continue, &j)
            .child("a", Behavior::Exit(7))
            .child("b", Behavior::Exit(9));
        assert_eq!(run(root, &[1]).unwrap(), Some(9));
        assert_eq!(*j.borrow(), ["root invoked", "b invoked"]);
    }

    #[test]
    fn explicit_value_stops_descent() {
        let j = journal();
        let root = Recorder::new("root", Behavior::Exit(2), &j).child("a", Behavior::Exit(7));
        assert_eq!(run(root, &[0]).unwrap(), Some(2));
        assert_eq!(*j.borrow(), ["root invoked"]);
    }

    #[test]
    fn end_of_selection_yields_nothing() {
        let j = journal();
        let root = Recorder::new("root", Behavior::Continue, &j).child("a", Behavior::Exit(7));
        assert_eq!(run(root, &[]).unwrap(), None);
    }

    #[test]
    fn scope_wraps_descendants() {
        let j = journal();
        let root = Recorder::new("root", Behavior::Scoped, &j).child("a", Behavior::Exit(0));
        assert_eq!(run(root, &[0]).unwrap(), Some(0));
        assert_eq!(
            *j.borrow(),
            ["root invoked", "root setup", "a invoked", "root teardown"]
        );
    }

    #[test]
    fn teardown_runs_when_descendant_fails() {
        let j = journal();
        let root = Recorder::new("root", Behavior::Scoped, &j).child("a", Behavior::Fail);
        let err = run(root, &[0]).unwrap_err();
        assert_eq!(err.to_string(), "a failed");
        assert_eq!(j.borrow().last().map(String::as_str), Some("root teardown"));
    }

    #[test]
    fn descendant_error_wins_over_teardown_error() {
        let j = journal();
        let root =
            Recorder::new("root", Behavior::ScopedFailingTeardown, &j).child("a", Behavior::Fail);
        assert_eq!(run(root, &[0]).unwrap_err().to_string(), "a failed");
    }

    #[test]
    fn teardown_error_surfaces_after_success() {
        let j = journal();
        let root = Recorder::new("root", Behavior::ScopedFailingTeardown, &j)
            .child("a", Behavior::Continue);
        assert_eq!(run(root, &[0]).unwrap_err().to_string(), "teardown failed");
    }

    #[test]
    fn nested_scopes_unwind_inside_out() {
        let j = journal();
        let root = Recorder::new("root", Behavior::Scoped, &j).child("a", Behavior::Scoped);
        let tree = build_cmd_tree(CommandSource::Instance(Box::new(root)), None);
        let chain = tree.select(&[0]).unwrap();
        dispatch_chain(&chain, &mut Context::new()).unwrap();
        let journal = j.borrow();
        let teardowns: Vec<_> = journal.iter().filter(|e| e.ends_with("teardown")).collect();
        assert_eq!(teardowns, ["a teardown", "root teardown"]);
    }

    /// A group that keeps the default `invoked` and counts how often its
    /// children are built.
    struct CountingGroup {
        builds: Rc<Cell<u32>>,
    }

    struct Leaf;

    impl Command for Leaf {}

    impl Command for CountingGroup {
        fn sub_commands(&self) -> Vec<SubCommand> {
            self.builds.set(self.builds.get() + 1);
            vec![SubCommand::instance("leaf", Leaf)]
        }
    }

    #[test]
    fn default_invoked_does_not_rebuild_children() {
        let builds = Rc::new(Cell::new(0));
        let root = CountingGroup {
            builds: Rc::clone(&builds),
        };
        let tree = build_cmd_tree(CommandSource::Instance(Box::new(root)), None);
        assert_eq!(builds.get(), 1);

        let chain = tree.select(&[0]).unwrap();
        assert_eq!(dispatch_chain(&chain, &mut Context::new()).unwrap(), None);
        assert_eq!(builds.get(), 1);
    }
}
