//! Boundary with the generation engine.
//!
//! The shell never renders templates itself. It loads models and bundle
//! catalogs and hands a [`GenerationRequest`] to a [`GeneratorEngine`],
//! which answers with a [`GenerationResult`]. Types crossing the boundary
//! are serializable so an engine can run out of process.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tsh_bundle::{TargetDefinition, TargetsDefinitions};
use typed_builder::TypedBuilder;

use crate::error::EngineError;

/// Operations the shell needs from a generation engine.
///
/// Every call receives the project directory the session currently works
/// in, so an engine holds no session state of its own.
pub trait GeneratorEngine {
    /// Load the model called `name`.
    ///
    /// # Errors
    ///
    /// Returns a tool-level `EngineError` if the model cannot be located or
    /// read.
    fn load_model(&self, project: &Path, name: &str) -> Result<Model, EngineError>;

    /// Read the target catalog of `bundle`.
    ///
    /// # Errors
    ///
    /// Returns a tool-level `EngineError` if the bundle cannot be located or
    /// its catalog is malformed.
    fn target_definitions(
        &self,
        project: &Path,
        bundle: &str,
    ) -> Result<TargetsDefinitions, EngineError>;

    /// Generate the requested targets.
    ///
    /// Per-target failures are reported inside the returned result; an
    /// `Err` means the run as a whole could not take place.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Generation` if the engine fails, or a tool-level
    /// error if it cannot be started.
    fn launch_generation(
        &self,
        project: &Path,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, EngineError>;
}

// ── Model ────────────────────────────────────────────────────

/// A loaded model: its name and its entities in model order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// An entity of a model, identified by its class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub class_name: String,
}

impl Model {
    /// Build a model from class names, keeping their order.
    pub fn new<I, S>(name: impl Into<String>, class_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entities: class_names
                .into_iter()
                .map(|class_name| Entity {
                    class_name: class_name.into(),
                })
                .collect(),
        }
    }

    pub fn entity_by_class_name(&self, class_name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.class_name == class_name)
    }

    /// Class names of all entities, in model order.
    pub fn entity_names(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.class_name.clone()).collect()
    }
}

// ── Request / Result ─────────────────────────────────────────

/// Everything the engine needs for one generation run.
///
/// # Examples
///
/// ```
/// use tsh_core::{GenerationRequest, Model};
///
/// let request = GenerationRequest::builder()
///     .model(Model::new("shop", ["Car"]))
///     .entity_names(vec!["Car".to_owned()])
///     .bundle("java-basic")
///     .targets(Vec::new())
///     .build();
///
/// assert!(!request.include_resources());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    model: Model,

    entity_names: Vec<String>,

    #[builder(setter(into))]
    bundle: String,

    targets: Vec<TargetDefinition>,

    #[builder(default)]
    include_resources: bool,
}

impl GenerationRequest {
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn entity_names(&self) -> &[String] {
        &self.entity_names
    }

    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    pub fn targets(&self) -> &[TargetDefinition] {
        &self.targets
    }

    pub fn include_resources(&self) -> bool {
        self.include_resources
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default)]
    pub files_generated: usize,

    #[serde(default)]
    pub resources_copied: usize,

    #[serde(default)]
    pub errors: Vec<ErrorReport>,
}

impl GenerationResult {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// One failed target, with the chain of causes captured when it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error_type: String,

    pub message: String,

    /// Outermost first, innermost last.
    #[serde(default)]
    pub causes: Vec<Cause>,
}

/// A single link of a cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub kind: String,
    pub message: String,
}

impl Cause {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
