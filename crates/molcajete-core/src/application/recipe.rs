//! Recipes: ready-made ingredient lists with a `main` entry point.

use tracing::error;

use crate::application::{Bowl, Ingredient};
use crate::error::{MolcajeteError, MolcajeteResult};

/// A way to cook a command line application.
///
/// Implementors only provide [`ingredients`](Recipe::ingredients); the rest
/// wires them into a [`Bowl`] and turns the outcome into an exit status.
pub trait Recipe: Sized {
    fn ingredients(self) -> Vec<Box<dyn Ingredient>>;

    fn prepare(self) -> Bowl {
        Bowl::new(self.ingredients())
    }

    /// Run the pipeline and return its raw outcome.
    fn eat(self, argv: Option<Vec<String>>) -> MolcajeteResult<Option<u8>> {
        self.prepare().eat(argv)
    }

    /// Run the pipeline and map the outcome to a process exit status.
    ///
    /// No result maps to 0, an explicit result and exit requests to their
    /// value. Anything else is reported on stderr and maps to 1.
    fn main(self, argv: Option<Vec<String>>) -> u8 {
        exit_status(self.eat(argv))
    }
}

/// Map a pipeline outcome to a process exit status.
pub fn exit_status(outcome: MolcajeteResult<Option<u8>>) -> u8 {
    match outcome {
        Ok(result) => result.unwrap_or(0),
        Err(e @ (MolcajeteError::ExitRequested { .. } | MolcajeteError::Interrupted)) => {
            e.exit_code()
        }
        Err(e) => {
            error!(error = %e, category = ?e.category(), "application failed");
            eprintln!("error: {e}");
            for suggestion in e.suggestions() {
                eprintln!("  hint: {suggestion}");
            }
            1
        }
    }
}
