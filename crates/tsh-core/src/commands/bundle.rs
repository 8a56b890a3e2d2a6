//! Bundle selection: `b` and `lt`.

use tracing::info;

use crate::command::{Command, CommandContext, CommandError};
use crate::selector;

/// `b [name]`: print or select the current bundle.
#[derive(Debug, Clone, Copy)]
pub struct BundleCommand;

impl Command for BundleCommand {
    fn name(&self) -> &'static str {
        "b"
    }

    fn short_description(&self) -> &'static str {
        "Bundle"
    }

    fn description(&self) -> &'static str {
        "Prints the current bundle, or selects the given bundle after checking its catalog can be read"
    }

    fn usage(&self) -> &'static str {
        "b [bundle-name]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [_] => {
                let line = match ctx.env.current_bundle() {
                    Some(bundle) => format!("Current bundle : {bundle}"),
                    None => "No current bundle".to_owned(),
                };
                ctx.print(line);
            }
            [_, name] => {
                let project = ctx.env.project_directory().to_path_buf();
                match ctx.engine.target_definitions(&project, name) {
                    Ok(catalog) => {
                        info!(bundle = %name, templates = catalog.templates().len(), "bundle selected");
                        ctx.env.set_current_bundle(*name);
                        ctx.print(format!(
                            "Current bundle is now '{name}' ({} templates, {} resources)",
                            catalog.templates().len(),
                            catalog.resources().len()
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

/// `lt [pattern]`: list the template targets of the current bundle.
#[derive(Debug, Clone, Copy)]
pub struct ListTargetsCommand;

impl Command for ListTargetsCommand {
    fn name(&self) -> &'static str {
        "lt"
    }

    fn short_description(&self) -> &'static str {
        "List templates"
    }

    fn description(&self) -> &'static str {
        "Lists the templates of the current bundle, optionally those matching the given patterns"
    }

    fn usage(&self) -> &'static str {
        "lt [*|pattern[,pattern]]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        let bundle = ctx.require_bundle()?;
        let pattern = match args {
            [_] => "*",
            [_, pattern] => *pattern,
            _ => return Err(self.invalid_usage()),
        };

        let project = ctx.env.project_directory().to_path_buf();
        match ctx.engine.target_definitions(&project, &bundle) {
            Ok(catalog) => {
                let criteria = selector::build_criteria(pattern);
                let targets = selector::filter(catalog.templates(), criteria.as_deref());
                ctx.print(format!("Templates (bundle={bundle}) :"));
                ctx.print(selector::render_targets(&targets));
            }
            Err(e) => ctx.print_error("ERROR", &e),
        }
        Ok(())
    }
}
