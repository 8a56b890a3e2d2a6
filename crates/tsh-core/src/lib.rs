mod command;
pub mod commands;
mod config;
mod console;
mod engine;
mod env;
mod error;
mod project;
mod registry;
mod selector;
mod shell;

#[cfg(test)]
mod testing;

pub use command::{Cancelled, Command, CommandContext, CommandError};
pub use config::{INSTALL_CONFIG_FILE, InstallConfig, install_location, load_install_config};
pub use console::{Console, ScriptedConsole};
pub use engine::{Cause, Entity, ErrorReport, GenerationRequest, GenerationResult, GeneratorEngine, Model};
pub use env::{DEFAULT_GITHUB_STORE, Environment};
pub use error::{CoreError, EngineError};
pub use project::{PROJECT_DIR, ProjectEngine};
pub use registry::{CommandGroup, CommandRegistry};
pub use selector::{build_criteria, filter, render_targets, select, sort, target_line, target_type};
pub use shell::{LoopControl, Shell};
pub use tsh_bundle::{TargetDefinition, TargetsDefinitions};
