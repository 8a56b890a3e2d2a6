//! Command registry.
//!
//! Commands are registered explicitly, each under a group. Groups and the
//! commands inside them keep registration order, which is the order shown
//! by `help`. Lookup is by exact name only.

use std::collections::HashMap;
use std::fmt::Write;

use tracing::debug;

use crate::command::Command;
use crate::commands;
use crate::error::CoreError;

/// A named group of commands, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroup {
    name: &'static str,
    commands: Vec<&'static str>,
}

impl CommandGroup {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Names of the commands in this group.
    pub fn commands(&self) -> &[&'static str] {
        &self.commands
    }
}

/// Catalog of every command available in the shell.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<&'static str, usize>,
    groups: Vec<CommandGroup>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("groups", &self.groups)
            .finish()
    }
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateCommand` if two built-ins share a name.
    pub fn standard() -> Result<Self, CoreError> {
        let mut registry = Self::new();

        registry.register("Environment", Box::new(commands::PwdCommand))?;
        registry.register("Environment", Box::new(commands::CdCommand))?;
        registry.register("Environment", Box::new(commands::HomeCommand))?;
        registry.register("Environment", Box::new(commands::EnvCommand))?;
        registry.register("Environment", Box::new(commands::GitHubStoreCommand))?;

        registry.register("Model", Box::new(commands::ModelCommand))?;
        registry.register("Model", Box::new(commands::ListEntitiesCommand))?;

        registry.register("Bundle", Box::new(commands::BundleCommand))?;
        registry.register("Bundle", Box::new(commands::ListTargetsCommand))?;

        registry.register("Generation", Box::new(commands::GenerateCommand))?;

        registry.register("Help", Box::new(commands::HelpCommand))?;

        Ok(registry)
    }

    /// Add `command` at the end of `group`, creating the group if needed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateCommand` if the name is already taken.
    pub fn register(
        &mut self,
        group: &'static str,
        command: Box<dyn Command>,
    ) -> Result<(), CoreError> {
        let name = command.name();
        if self.index.contains_key(name) {
            return Err(CoreError::DuplicateCommand(name.to_owned()));
        }

        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.commands.push(name),
            None => self.groups.push(CommandGroup {
                name: group,
                commands: vec![name],
            }),
        }

        debug!(command = name, group, "command registered");
        self.index.insert(name, self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Find a command by its exact name.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.index.get(name).map(|&i| self.commands[i].as_ref())
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Grouped help listing: a heading per group, one line per command.
    pub fn render_help(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|c| c.name().len())
            .max()
            .unwrap_or_default();

        let mut out = String::new();
        for group in &self.groups {
            let _ = writeln!(out, "{} :", group.name);
            for command in group.commands.iter().filter_map(|name| self.find(name)) {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {}",
                    command.name(),
                    command.short_description()
                );
            }
        }
        out.push_str("Type 'help command-name' for details, 'q' to quit.");
        out
    }

    /// Detailed help for one command, or `None` if it does not exist.
    pub fn render_command_help(&self, name: &str) -> Option<String> {
        self.find(name).map(|command| {
            format!(
                "{} : {}\nUsage : {}",
                command.name(),
                command.description(),
                command.usage()
            )
        })
    }
}
