//! The bowl: runs a list of ingredients through every lifecycle phase.

use std::env;

use tracing::{debug, info, instrument};

use crate::application::{Context, DispatchFailure, Ingredient, Phase};
use crate::error::{MolcajeteError, MolcajeteResult};

/// An ordered list of ingredients plus the context they share.
///
/// Errors before dispatch are developer errors and propagate as they are,
/// without running `shutdown`. The only exception is
/// [`MolcajeteError::Interrupted`], which shuts down cleanly and yields no
/// result. Once dispatch starts, `shutdown` runs exactly once no matter how
/// dispatch ends.
pub struct Bowl {
    ingredients: Vec<Box<dyn Ingredient>>,
    context: Context,
}

impl Bowl {
    pub fn new(ingredients: Vec<Box<dyn Ingredient>>) -> Self {
        Self {
            ingredients,
            context: Context::new(),
        }
    }

    pub fn add_spice(&mut self, spice: impl Into<String>) {
        self.context.add_spice(spice);
    }

    pub fn has_spice(&self, spice: &str) -> bool {
        self.context.has_spice(spice)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn into_context(self) -> Context {
        self.context
    }

    /// Run the application.
    ///
    /// `argv` excludes the program name and defaults to the process
    /// arguments. Returns the value of the first ingredient whose `dispatch`
    /// produced one.
    #[instrument(skip_all, fields(ingredients = self.ingredients.len()))]
    pub fn eat(&mut self, argv: Option<Vec<String>>) -> MolcajeteResult<Option<u8>> {
        self.context.argv = argv.unwrap_or_else(|| env::args().skip(1).collect());

        for phase in Phase::STARTUP {
            match self.run_phase(phase) {
                Ok(()) => {}
                Err(MolcajeteError::Interrupted) => {
                    info!(%phase, "interrupted before dispatch");
                    self.run_phase(Phase::Shutdown)?;
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }
        }

        let outcome = self.dispatch_and_report();
        let shutdown = self.run_phase(Phase::Shutdown);
        match (outcome, shutdown) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(result), Ok(())) => Ok(result),
        }
    }

    fn dispatch_and_report(&mut self) -> MolcajeteResult<Option<u8>> {
        match self.dispatch() {
            Ok(result) => {
                self.run_phase(Phase::DispatchSucceeded)?;
                Ok(result)
            }
            Err(e @ MolcajeteError::ExitRequested { .. }) => Err(e),
            Err(e) => {
                debug!(error = %e, "dispatch failed");
                self.context.failure = Some(DispatchFailure::capture(e));
                self.run_phase(Phase::DispatchFailed)?;
                Ok(None)
            }
        }
    }

    fn dispatch(&mut self) -> MolcajeteResult<Option<u8>> {
        for (position, ingredient) in self.ingredients.iter_mut().enumerate() {
            if let Some(code) = ingredient.dispatch(&mut self.context)? {
                debug!(position, code, "ingredient dispatched");
                return Ok(Some(code));
            }
        }
        Ok(None)
    }

    fn run_phase(&mut self, phase: Phase) -> MolcajeteResult<()> {
        debug!(%phase, "running phase");
        for ingredient in &mut self.ingredients {
            phase.apply(ingredient.as_mut(), &mut self.context)?;
        }
        Ok(())
    }
}
