//! Interactive shell loop.
//!
//! [`Shell`] owns the session: environment, registry, engine and console.
//! Each input line is split on whitespace, the first token is resolved
//! against the registry and the command runs with a fresh
//! [`CommandContext`]. Errors returned by a command are printed and the
//! session goes on.

use tracing::{debug, info, instrument, warn};

use crate::command::CommandContext;
use crate::console::Console;
use crate::engine::GeneratorEngine;
use crate::env::Environment;
use crate::error::CoreError;
use crate::registry::CommandRegistry;

const EXIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

/// What the loop does after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// A shell session.
pub struct Shell<C, E> {
    env: Environment,
    registry: CommandRegistry,
    engine: E,
    console: C,
}

impl<C: Console, E: GeneratorEngine> Shell<C, E> {
    pub fn new(env: Environment, registry: CommandRegistry, engine: E, console: C) -> Self {
        Self {
            env,
            registry,
            engine,
            console,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Prompt showing the current selections, `-` when unset.
    pub fn prompt(&self) -> String {
        format!(
            "[{}/{}] > ",
            self.env.current_model().unwrap_or("-"),
            self.env.current_bundle().unwrap_or("-")
        )
    }

    /// Read and execute lines until an exit command or end of input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the console cannot be read.
    pub fn run(&mut self) -> Result<(), CoreError> {
        info!(commands = self.registry.len(), "shell started");
        self.console.print("tsh - type 'help' for the list of commands, 'q' to quit.");

        loop {
            let prompt = self.prompt();
            let Some(line) = self.console.read_line(&prompt)? else {
                debug!("end of input");
                break;
            };
            if self.execute_line(&line) == LoopControl::Exit {
                break;
            }
        }

        info!("shell stopped");
        Ok(())
    }

    /// Execute one input line.
    #[instrument(skip(self))]
    pub fn execute_line(&mut self, line: &str) -> LoopControl {
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = args.first() else {
            return LoopControl::Continue;
        };
        if EXIT_COMMANDS.contains(&name) {
            return LoopControl::Exit;
        }

        let Some(command) = self.registry.find(name) else {
            self.console.print(&format!(
                "Unknown command '{name}' (type 'help' for the list of commands)"
            ));
            return LoopControl::Continue;
        };

        let mut ctx = CommandContext {
            env: &mut self.env,
            console: &mut self.console,
            engine: &self.engine,
            registry: &self.registry,
        };
        if let Err(e) = command.execute(&mut ctx, &args) {
            warn!(command = name, error = %e, "command failed");
            ctx.print(e.to_string());
        }
        LoopControl::Continue
    }
}
