//! The `help` command.

use crate::command::{Command, CommandContext, CommandError};

/// `help [command]`: list commands, or describe one.
#[derive(Debug, Clone, Copy)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn short_description(&self) -> &'static str {
        "Help"
    }

    fn description(&self) -> &'static str {
        "Lists the available commands, or prints the description and usage of the given command"
    }

    fn usage(&self) -> &'static str {
        "help [command-name]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        let text = match args {
            [_] => ctx.registry.render_help(),
            [_, name] => ctx
                .registry
                .render_command_help(name)
                .ok_or_else(|| CommandError::InvalidArgument(format!("Unknown command '{name}'")))?,
            _ => return Err(self.invalid_usage()),
        };
        ctx.print(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CommandRegistry;
    use crate::testing::{FakeEngine, Harness};

    fn harness() -> Harness {
        let mut h = Harness::new(FakeEngine::default());
        h.registry = CommandRegistry::standard().expect("built-ins should register");
        h
    }

    #[test]
    fn test_should_list_groups_in_registration_order() {
        let mut h = harness();

        h.run(&HelpCommand, &["help"]).expect("should run");

        let out = h.output();
        let environment = out.find("Environment :").expect("environment group");
        let generation = out.find("Generation :").expect("generation group");
        assert!(environment < generation);
        assert!(out.contains("  gen   Generate"));
        assert!(out.ends_with("'q' to quit."));
    }

    #[test]
    fn test_should_describe_one_command() {
        let mut h = harness();

        h.run(&HelpCommand, &["help", "gen"]).expect("should run");

        assert_eq!(
            h.output(),
            "gen : Generates the given targets for the given entities\nUsage : gen *|entity-name *|template-name"
        );
    }

    #[test]
    fn test_should_reject_unknown_command() {
        let mut h = harness();

        let err = h.run(&HelpCommand, &["help", "nope"]).unwrap_err();

        assert_eq!(err, CommandError::InvalidArgument("Unknown command 'nope'".to_owned()));
        assert_eq!(h.output(), "");
    }
}
