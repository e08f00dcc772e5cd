//! The per-run property bag shared by every ingredient and command.

use std::any::Any;
use std::backtrace::Backtrace;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::application::ApplicationError;
use crate::application::cmdtree::CommandTreeNode;
use crate::domain::{
    AnsiFormatter, ColorController, EarlyArgs, ParsedArgs, ParserSpec, Style, TerminalInfo,
};
use crate::error::{ErrorCategory, MolcajeteError, MolcajeteResult};

/// A dispatch error captured by the pipeline.
///
/// Errors are plain values, so the backtrace is the stack at the point of
/// capture: the bowl's dispatch step, not the place the error was raised.
#[derive(Debug)]
pub struct DispatchFailure {
    error: MolcajeteError,
    backtrace: Backtrace,
}

impl DispatchFailure {
    /// Capture `error` together with the current stack (honours
    /// `RUST_BACKTRACE`).
    pub fn capture(error: MolcajeteError) -> Self {
        Self {
            error,
            backtrace: Backtrace::capture(),
        }
    }

    pub fn error(&self) -> &MolcajeteError {
        &self.error
    }

    pub fn category(&self) -> ErrorCategory {
        self.error.category()
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn into_error(self) -> MolcajeteError {
        self.error
    }
}

/// State shared by all ingredients during one pipeline run.
///
/// Well-known entries are typed fields. Anything else goes into the
/// extension map under a namespaced key (`"git:session"`, `"log:level"`).
/// Nothing may assume an entry exists: the `Option` fields stay `None` until
/// the ingredient responsible for them has run.
pub struct Context {
    /// Command line arguments, without the program name.
    pub argv: Vec<String>,
    /// Root of the command tree, once built.
    pub cmd_tree: Option<Rc<CommandTreeNode>>,
    pub early_parser: Option<ParserSpec>,
    pub early_args: Option<EarlyArgs>,
    pub parser: Option<ParserSpec>,
    pub args: Option<ParsedArgs>,
    /// Deepest level the parser knows about.
    pub max_level: usize,
    pub color_ctrl: ColorController,
    pub ansi: AnsiFormatter,
    pub terminal: Option<TerminalInfo>,
    /// Set when dispatch failed, before `dispatch_failed` runs.
    pub failure: Option<DispatchFailure>,
    spices: BTreeSet<String>,
    extensions: HashMap<String, Box<dyn Any>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            argv: Vec::new(),
            cmd_tree: None,
            early_parser: None,
            early_args: None,
            parser: None,
            args: None,
            max_level: 0,
            color_ctrl: ColorController::new(),
            ansi: AnsiFormatter::default(),
            terminal: None,
            failure: None,
            spices: BTreeSet::new(),
            extensions: HashMap::new(),
        }
    }

    // ── Spices ───────────────────────────────────────────────────────────────

    pub fn add_spice(&mut self, spice: impl Into<String>) {
        self.spices.insert(spice.into());
    }

    pub fn has_spice(&self, spice: &str) -> bool {
        self.spices.contains(spice)
    }

    pub fn spices(&self) -> &BTreeSet<String> {
        &self.spices
    }

    // ── Required entries ─────────────────────────────────────────────────────

    pub fn require_args(&self, needed_by: &'static str) -> MolcajeteResult<&ParsedArgs> {
        self.args.as_ref().ok_or_else(|| {
            ApplicationError::MissingContext {
                what: "parsed arguments",
                needed_by,
            }
            .into()
        })
    }

    pub fn require_cmd_tree(
        &self,
        needed_by: &'static str,
    ) -> MolcajeteResult<Rc<CommandTreeNode>> {
        self.cmd_tree.clone().ok_or_else(|| {
            ApplicationError::MissingContext {
                what: "command tree",
                needed_by,
            }
            .into()
        })
    }

    pub fn require_parser(&self, needed_by: &'static str) -> MolcajeteResult<&ParserSpec> {
        self.parser.as_ref().ok_or_else(|| {
            ApplicationError::MissingContext {
                what: "parser",
                needed_by,
            }
            .into()
        })
    }

    pub fn require_parser_mut(
        &mut self,
        needed_by: &'static str,
    ) -> MolcajeteResult<&mut ParserSpec> {
        self.parser.as_mut().ok_or_else(|| {
            ApplicationError::MissingContext {
                what: "parser",
                needed_by,
            }
            .into()
        })
    }

    // ── Extensions ───────────────────────────────────────────────────────────

    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.extensions.insert(key.into(), Box::new(value));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.extensions.contains_key(key)
    }

    /// Look up an extension, telling a missing key from a type mismatch.
    pub fn try_get<T: Any>(&self, key: &str) -> Result<Option<&T>, ApplicationError> {
        match self.extensions.get(key) {
            None => Ok(None),
            Some(value) => value
                .downcast_ref::<T>()
                .map(Some)
                .ok_or_else(|| ApplicationError::ExtensionType {
                    key: key.to_string(),
                }),
        }
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.extensions.get(key)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.extensions.get_mut(key)?.downcast_mut::<T>()
    }

    pub fn remove<T: Any>(&mut self, key: &str) -> Option<T> {
        let value = self.extensions.remove(key)?;
        value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    // ── Output helpers ───────────────────────────────────────────────────────

    /// Style `text` through the color controller and the ANSI formatter.
    pub fn paint(&self, text: &str, style: &Style) -> MolcajeteResult<String> {
        Ok(self.ansi.paint(text, style, &self.color_ctrl)?)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Context")
            .field("argv", &self.argv)
            .field("spices", &self.spices)
            .field("cmd_tree", &self.cmd_tree.is_some())
            .field("parser", &self.parser.is_some())
            .field("args", &self.args)
            .field("max_level", &self.max_level)
            .field("ansi", &self.ansi)
            .field("terminal", &self.terminal.as_ref().map(|t| &t.slug))
            .field("failure", &self.failure.as_ref().map(|f| f.error().to_string()))
            .field("extensions", &keys)
            .finish()
    }
}
