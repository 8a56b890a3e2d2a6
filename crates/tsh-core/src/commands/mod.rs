//! Built-in shell commands, registered by
//! [`CommandRegistry::standard`](crate::CommandRegistry::standard).

mod bundle;
mod environment;
mod generate;
mod help;
mod model;

pub use bundle::{BundleCommand, ListTargetsCommand};
pub use environment::{CdCommand, EnvCommand, GitHubStoreCommand, HomeCommand, PwdCommand};
pub use generate::{GenerateCommand, GenerateStage, resolve_entity_names};
pub use help::HelpCommand;
pub use model::{ListEntitiesCommand, ModelCommand};
