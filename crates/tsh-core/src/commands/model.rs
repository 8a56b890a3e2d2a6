//! Model selection: `m` and `le`.

use tracing::info;

use crate::command::{Command, CommandContext, CommandError};

/// `m [name]`: print or select the current model.
#[derive(Debug, Clone, Copy)]
pub struct ModelCommand;

impl Command for ModelCommand {
    fn name(&self) -> &'static str {
        "m"
    }

    fn short_description(&self) -> &'static str {
        "Model"
    }

    fn description(&self) -> &'static str {
        "Prints the current model, or selects the given model after checking it can be loaded"
    }

    fn usage(&self) -> &'static str {
        "m [model-name]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [_] => {
                let line = match ctx.env.current_model() {
                    Some(model) => format!("Current model : {model}"),
                    None => "No current model".to_owned(),
                };
                ctx.print(line);
            }
            [_, name] => {
                let project = ctx.env.project_directory().to_path_buf();
                match ctx.engine.load_model(&project, name) {
                    Ok(model) => {
                        info!(model = %model.name, entities = model.entities.len(), "model selected");
                        ctx.env.set_current_model(*name);
                        ctx.print(format!(
                            "Current model is now '{name}' ({} entities)",
                            model.entities.len()
                        ));
                    }
                    Err(e) => ctx.print_error("ERROR", &e),
                }
            }
            _ => return Err(self.invalid_usage()),
        }
        Ok(())
    }
}

/// `le`: list the entities of the current model.
#[derive(Debug, Clone, Copy)]
pub struct ListEntitiesCommand;

impl Command for ListEntitiesCommand {
    fn name(&self) -> &'static str {
        "le"
    }

    fn short_description(&self) -> &'static str {
        "List entities"
    }

    fn description(&self) -> &'static str {
        "Lists the entities of the current model"
    }

    fn usage(&self) -> &'static str {
        "le"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        let model_name = ctx.require_model()?;
        if args.len() != 1 {
            return Err(self.invalid_usage());
        }

        let project = ctx.env.project_directory().to_path_buf();
        match ctx.engine.load_model(&project, &model_name) {
            Ok(model) if model.entities.is_empty() => ctx.print("No entity"),
            Ok(model) => {
                ctx.print(format!("Entities (model={}) :", model.name));
                for entity in &model.entities {
                    ctx.print(format!(" . {}", entity.class_name));
                }
            }
            Err(e) => ctx.print_error("ERROR", &e),
        }
        Ok(())
    }
}
