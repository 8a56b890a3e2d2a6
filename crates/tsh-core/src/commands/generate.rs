//! The `gen` command.
//!
//! Generation moves through fixed stages:
//!
//! ```text
//! AwaitingModel -> AwaitingBundle -> AwaitingArgs -> AwaitingConfirmation -> Executing -> Reported
//! ```
//!
//! The three `Awaiting*` gates before confirmation return a usage or
//! precondition error without touching anything. Past the gates, failures
//! (unknown entity, engine errors) are printed and the command still
//! returns `Ok`, so the shell session stays usable. Declining the
//! confirmation is not an error either.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use tsh_bundle::TargetDefinition;

use crate::command::{Cancelled, Command, CommandContext, CommandError};
use crate::engine::{GenerationRequest, GenerationResult, Model};
use crate::error::EngineError;
use crate::selector;

/// Stage reached by a `gen` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStage {
    AwaitingModel,
    AwaitingBundle,
    AwaitingArgs,
    AwaitingConfirmation,
    Executing,
    Reported,
}

/// Why a generation stopped after the argument gates.
#[derive(Debug, Error)]
enum GenerateFailure {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// `gen *|entity-name *|template-name`: generate targets for entities.
#[derive(Debug, Clone, Copy)]
pub struct GenerateCommand;

impl Command for GenerateCommand {
    fn name(&self) -> &'static str {
        "gen"
    }

    fn short_description(&self) -> &'static str {
        "Generate"
    }

    fn description(&self) -> &'static str {
        "Generates the given targets for the given entities"
    }

    fn usage(&self) -> &'static str {
        "gen *|entity-name *|template-name"
    }

    #[instrument(skip_all, fields(args = ?args))]
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        enter(GenerateStage::AwaitingModel);
        let model_name = ctx.require_model()?;

        enter(GenerateStage::AwaitingBundle);
        let bundle = ctx.require_bundle()?;

        enter(GenerateStage::AwaitingArgs);
        let [_, entity_arg, template_arg] = args else {
            return Err(self.invalid_usage());
        };

        match generate(ctx, &model_name, &bundle, entity_arg, template_arg) {
            Ok(Some(result)) => print_result(ctx, &result),
            Ok(None) => ctx.print("Generation canceled."),
            Err(GenerateFailure::Cancelled(cancel)) => {
                info!(reason = %cancel, "generation cancelled");
                ctx.print(cancel.to_string());
            }
            Err(GenerateFailure::Engine(e)) => {
                warn!(error = %e, "generation aborted");
                let label = if e.is_generation() { "GENERATION ERROR" } else { "ERROR" };
                ctx.print_error(label, &e);
            }
        }
        enter(GenerateStage::Reported);
        Ok(())
    }
}

fn enter(stage: GenerateStage) {
    debug!(?stage, "gen");
}

/// Resolve, preview, confirm and delegate. `Ok(None)` means the user
/// declined.
fn generate(
    ctx: &mut CommandContext<'_>,
    model_name: &str,
    bundle: &str,
    entity_arg: &str,
    template_arg: &str,
) -> Result<Option<GenerationResult>, GenerateFailure> {
    let project = ctx.env.project_directory().to_path_buf();

    let model = ctx.engine.load_model(&project, model_name)?;
    let entity_names = resolve_entity_names(entity_arg, &model)?;
    let targets = resolve_targets(ctx, &project, bundle, template_arg)?;

    ctx.print(format!("Entities (model={}) : ", model.name));
    for name in &entity_names {
        ctx.print(format!(" . {name}"));
    }
    ctx.print(format!("Templates (bundle={bundle}) : "));
    ctx.print(selector::render_targets(&targets));

    enter(GenerateStage::AwaitingConfirmation);
    let confirmed = ctx
        .console
        .confirm("Do you want to launch the generation")
        .unwrap_or_else(|e| {
            warn!(error = %e, "cannot read confirmation, treating as declined");
            false
        });
    if !confirmed {
        return Ok(None);
    }

    enter(GenerateStage::Executing);
    ctx.print("Generation in progress...");
    info!(
        model = %model.name,
        bundle,
        entities = entity_names.len(),
        targets = targets.len(),
        "launching generation"
    );
    let request = GenerationRequest::builder()
        .model(model)
        .entity_names(entity_names)
        .bundle(bundle)
        .targets(targets)
        .include_resources(false)
        .build();

    Ok(Some(ctx.engine.launch_generation(&project, &request)?))
}

/// Resolve an entity argument against `model`.
///
/// `*` selects every entity in model order. Otherwise each comma-separated,
/// trimmed, non-empty name must exist in the model.
///
/// # Errors
///
/// Returns `Cancelled` on the first unknown entity; no partial list is
/// returned.
pub fn resolve_entity_names(arg: &str, model: &Model) -> Result<Vec<String>, Cancelled> {
    if arg == "*" {
        return Ok(model.entity_names());
    }

    arg.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| match model.entity_by_class_name(name) {
            Some(_) => Ok(name.to_owned()),
            None => Err(Cancelled(format!("Unknown entity '{name}'"))),
        })
        .collect()
}

/// Template targets of `bundle` selected by `template_arg`, resources
/// excluded.
fn resolve_targets(
    ctx: &CommandContext<'_>,
    project: &Path,
    bundle: &str,
    template_arg: &str,
) -> Result<Vec<TargetDefinition>, EngineError> {
    let catalog = ctx.engine.target_definitions(project, bundle)?;
    let criteria = selector::build_criteria(template_arg);
    let targets = selector::filter(catalog.templates(), criteria.as_deref());
    debug!(
        available = catalog.templates().len(),
        selected = targets.len(),
        "targets resolved"
    );
    Ok(targets)
}

fn print_result(ctx: &mut CommandContext<'_>, result: &GenerationResult) {
    ctx.print("Generation completed.");
    ctx.print(format!(" {} file(s) generated", result.files_generated));
    ctx.print(format!(" {} resource(s) copied", result.resources_copied));
    ctx.print(format!(" {} error(s)", result.error_count()));

    for (i, err) in result.errors.iter().enumerate() {
        ctx.print(format!(" - Error #{}", i + 1));
        ctx.print(format!("   Type : {}", err.error_type));
        ctx.print(format!("   Message : {}", err.message));
        let mut causes = err.causes.iter();
        if let Some(first) = causes.next() {
            ctx.print(format!("   Exception : {} : {}", first.kind, first.message));
        }
        for cause in causes {
            ctx.print(format!("    Cause : {} : {}", cause.kind, cause.message));
        }
    }
}
