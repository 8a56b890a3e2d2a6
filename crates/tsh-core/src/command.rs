//! Command contract.
//!
//! A [`Command`] is a named unit of work. The shell resolves it by name and
//! calls [`Command::execute`] with a [`CommandContext`] giving access to the
//! session environment, the console, the engine and the registry. Commands
//! hold no state: building one never touches the environment.
//!
//! `execute` returns `Ok(())` when the command ran, output included, and
//! `Err` with a user-facing message for usage and precondition failures.
//! Engine failures and cancellations are printed by the command itself and
//! never escape `execute`.

use thiserror::Error;

use crate::console::Console;
use crate::engine::GeneratorEngine;
use crate::env::Environment;
use crate::registry::CommandRegistry;

/// Errors a command returns to the shell, printed as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Wrong number or shape of arguments.
    #[error("{0}")]
    Usage(String),

    /// A required session selection is missing.
    #[error("{0}")]
    Precondition(String),

    /// An argument names something that does not exist.
    #[error("{0}")]
    InvalidArgument(String),
}

/// Deliberate abort of the in-flight command, e.g. an unknown entity name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct Cancelled(pub String);

/// A shell command.
pub trait Command {
    /// Unique name typed by the user.
    fn name(&self) -> &'static str;

    /// One-line description shown in the help listing.
    fn short_description(&self) -> &'static str;

    /// Full description shown by `help <name>`.
    fn description(&self) -> &'static str;

    /// Usage line, e.g. `gen *|entity-name *|template-name`.
    fn usage(&self) -> &'static str;

    /// Run the command. `args[0]` is the command name as typed.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for usage and precondition failures; no state
    /// is changed in that case.
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError>;

    /// The usage error for this command.
    fn invalid_usage(&self) -> CommandError {
        CommandError::Usage(format!("Usage : {}", self.usage()))
    }
}

/// Everything a command may read or mutate while it runs.
pub struct CommandContext<'a> {
    pub env: &'a mut Environment,
    pub console: &'a mut dyn Console,
    pub engine: &'a dyn GeneratorEngine,
    pub registry: &'a CommandRegistry,
}

impl CommandContext<'_> {
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.console.print(text.as_ref());
    }

    /// The current model name.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Precondition` when no model is selected.
    pub fn require_model(&self) -> Result<String, CommandError> {
        self.env.current_model().map(str::to_owned).ok_or_else(|| {
            CommandError::Precondition("No current model (use 'm model-name' to select one)".to_owned())
        })
    }

    /// The current bundle name.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Precondition` when no bundle is selected.
    pub fn require_bundle(&self) -> Result<String, CommandError> {
        self.env.current_bundle().map(str::to_owned).ok_or_else(|| {
            CommandError::Precondition(
                "No current bundle (use 'b bundle-name' to select one)".to_owned(),
            )
        })
    }

    /// Print an error with its chain of sources, outermost first.
    pub fn print_error(&mut self, label: &str, error: &dyn std::error::Error) {
        self.print(format!("{label} : {error}"));
        let mut source = error.source();
        while let Some(cause) = source {
            self.print(format!("  Cause : {cause}"));
            source = cause.source();
        }
    }
}
