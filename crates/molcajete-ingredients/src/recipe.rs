//! The stock recipe for command tree applications.

use molcajete_core::application::ingredients::{
    ColorIngredient, ColorSettings, CommandTreeBuilder, CommandTreeDispatcher,
};
use molcajete_core::application::{Command, CommandSource, Ingredient, Recipe};

use crate::{
    AnsiIngredient, AutocompleteIngredient, LogLevel, LoggingIngredient, ParserIngredient,
    TerminalIngredient, VerboseCrashHandler,
};

/// Everything a command tree application needs, in the order it needs it.
///
/// ```no_run
/// use molcajete_core::prelude::*;
/// use molcajete_ingredients::CommandRecipe;
///
/// struct Hello;
///
/// impl Command for Hello {
///     fn info(&self) -> CommandInfo {
///         CommandInfo::new().help("say hello")
///     }
///
///     fn invoked(&self, _ctx: &mut Context) -> MolcajeteResult<Invoked> {
///         println!("hello");
///         Ok(Invoked::Continue)
///     }
/// }
///
/// std::process::exit(CommandRecipe::new(Hello).main(None).into());
/// ```
pub struct CommandRecipe {
    root: CommandSource,
    prog: Option<String>,
    color_settings: ColorSettings,
    log_level: LogLevel,
    crash_handler: bool,
}

impl CommandRecipe {
    pub fn new(root: impl Command + 'static) -> Self {
        Self::from_source(CommandSource::Instance(Box::new(root)))
    }

    pub fn from_source(root: CommandSource) -> Self {
        Self {
            root,
            prog: None,
            color_settings: ColorSettings::default(),
            log_level: LogLevel::default(),
            crash_handler: true,
        }
    }

    /// Program name used in usage and help output.
    pub fn prog(mut self, prog: impl Into<String>) -> Self {
        self.prog = Some(prog.into());
        self
    }

    pub fn with_color_settings(mut self, settings: ColorSettings) -> Self {
        self.color_settings = settings;
        self
    }

    pub fn with_default_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Leave failed dispatches unreported; the pipeline then ends normally.
    pub fn without_crash_handler(mut self) -> Self {
        self.crash_handler = false;
        self
    }
}

impl Recipe for CommandRecipe {
    fn ingredients(self) -> Vec<Box<dyn Ingredient>> {
        let parser = match self.prog {
            Some(prog) => ParserIngredient::with_prog(prog),
            None => ParserIngredient::new(),
        };
        let mut ingredients: Vec<Box<dyn Ingredient>> = vec![
            Box::new(AnsiIngredient::new()),
            Box::new(TerminalIngredient::new()),
            Box::new(CommandTreeBuilder::from_source(self.root)),
            Box::new(CommandTreeDispatcher::new()),
            Box::new(AutocompleteIngredient::new()),
            Box::new(parser),
            Box::new(ColorIngredient::with_settings(self.color_settings)),
            Box::new(LoggingIngredient::with_default_level(self.log_level)),
        ];
        if self.crash_handler {
            ingredients.push(Box::new(VerboseCrashHandler::new()));
        }
        ingredients
    }
}
