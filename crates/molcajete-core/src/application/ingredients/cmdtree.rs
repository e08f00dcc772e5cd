//! Ingredients building and dispatching the command tree.

use std::rc::Rc;

use tracing::debug;

use crate::application::{
    Command, CommandSource, Context, Ingredient, build_cmd_tree, dispatch_chain,
};
use crate::error::{MolcajeteError, MolcajeteResult};

/// Builds the command tree as soon as it is added to the bowl.
///
/// Also copies the spices of the root command into the context.
pub struct CommandTreeBuilder {
    root: Option<CommandSource>,
}

impl CommandTreeBuilder {
    pub fn new(root: impl Command + 'static) -> Self {
        Self::from_source(CommandSource::Instance(Box::new(root)))
    }

    pub fn from_source(root: CommandSource) -> Self {
        Self { root: Some(root) }
    }
}

impl Ingredient for CommandTreeBuilder {
    fn added(&mut self, ctx: &mut Context) -> MolcajeteResult<()> {
        let root = self.root.take().ok_or_else(|| MolcajeteError::Internal {
            message: "command tree built twice".into(),
        })?;
        let tree = build_cmd_tree(root, None);
        for spice in tree.command.info().spices {
            ctx.add_spice(spice);
        }
        debug!(commands = tree.size(), spices = ?ctx.spices(), "command tree ready");
        ctx.cmd_tree = Some(Rc::new(tree));
        Ok(())
    }
}

/// Dispatches the command the parser selected.
///
/// Without parsed arguments only the root command runs.
#[derive(Debug, Default)]
pub struct CommandTreeDispatcher;

impl CommandTreeDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Ingredient for CommandTreeDispatcher {
    fn dispatch(&mut self, ctx: &mut Context) -> MolcajeteResult<Option<u8>> {
        let tree = ctx.require_cmd_tree("CommandTreeDispatcher")?;
        let selection = ctx
            .args
            .as_ref()
            .map(|args| args.selection().to_vec())
            .unwrap_or_default();
        let chain = tree.select(&selection)?;
        dispatch_chain(&chain, ctx)
    }
}
