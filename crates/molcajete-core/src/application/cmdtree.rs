//! The command tree: every command of the application, instantiated once.

use std::fmt;

use tracing::debug;

use crate::application::{ApplicationError, Command, CommandSource};

/// A command together with the name it is invoked by and its children.
///
/// The root has no name; the caller usually takes it from the program name.
pub struct CommandTreeNode {
    pub name: Option<String>,
    pub command: Box<dyn Command>,
    pub children: Vec<CommandTreeNode>,
}

impl CommandTreeNode {
    /// Follow `selection` (child indexes) from this node.
    ///
    /// The result starts with this node and holds one node per index.
    pub fn select(&self, selection: &[usize]) -> Result<Vec<&CommandTreeNode>, ApplicationError> {
        let mut chain = Vec::with_capacity(selection.len() + 1);
        let mut node = self;
        chain.push(node);
        for (depth, &index) in selection.iter().enumerate() {
            node = node
                .children
                .get(index)
                .ok_or(ApplicationError::InvalidSelection {
                    level: depth + 1,
                    index,
                })?;
            chain.push(node);
        }
        Ok(chain)
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CommandTreeNode::size).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Debug for CommandTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTreeNode")
            .field("name", &self.name)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Instantiate `source` and all of its declared sub-commands.
///
/// Each node is named by `name` when the parent declared one, otherwise by
/// the command's own `info().name`, otherwise not at all. Every factory is
/// called exactly once. The declarations must form a finite tree.
pub fn build_cmd_tree(source: CommandSource, name: Option<String>) -> CommandTreeNode {
    let command = source.instantiate();
    let name = name.or_else(|| command.info().name);
    let children = command
        .sub_commands()
        .into_iter()
        .map(|sub| build_cmd_tree(sub.source, sub.name))
        .collect::<Vec<_>>();
    debug!(name = ?name, children = children.len(), "built command node");
    CommandTreeNode {
        name,
        command,
        children,
    }
}
