//! Shared fixtures for command tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tsh_bundle::{TargetDefinition, TargetsDefinitions};

use crate::command::{Command, CommandContext, CommandError};
use crate::config::InstallConfig;
use crate::console::ScriptedConsole;
use crate::engine::{GenerationRequest, GenerationResult, GeneratorEngine, Model};
use crate::env::Environment;
use crate::error::EngineError;
use crate::registry::CommandRegistry;

/// In-memory engine recording every generation request.
#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub models: HashMap<String, Model>,
    pub bundles: HashMap<String, TargetsDefinitions>,
    pub result: GenerationResult,
    pub generation_failure: Option<String>,
    pub requests: RefCell<Vec<GenerationRequest>>,
}

impl FakeEngine {
    pub fn with_model(mut self, model: Model) -> Self {
        self.models.insert(model.name.clone(), model);
        self
    }

    pub fn with_bundle(self, name: &str, templates: Vec<TargetDefinition>) -> Self {
        self.with_catalog(name, templates, Vec::new())
    }

    pub fn with_catalog(
        mut self,
        name: &str,
        templates: Vec<TargetDefinition>,
        resources: Vec<TargetDefinition>,
    ) -> Self {
        self.bundles
            .insert(name.to_owned(), TargetsDefinitions::new(templates, resources));
        self
    }
}

impl GeneratorEngine for FakeEngine {
    fn load_model(&self, _project: &Path, name: &str) -> Result<Model, EngineError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::Tool(format!("model '{name}' not found")))
    }

    fn target_definitions(
        &self,
        _project: &Path,
        bundle: &str,
    ) -> Result<TargetsDefinitions, EngineError> {
        self.bundles
            .get(bundle)
            .cloned()
            .ok_or_else(|| EngineError::Tool(format!("bundle '{bundle}' not found")))
    }

    fn launch_generation(
        &self,
        _project: &Path,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, EngineError> {
        self.requests.borrow_mut().push(request.clone());
        match &self.generation_failure {
            Some(message) => Err(EngineError::Generation(message.clone())),
            None => Ok(self.result.clone()),
        }
    }
}

pub(crate) fn target(id: &str, template: &str) -> TargetDefinition {
    TargetDefinition::builder()
        .id(id)
        .file(format!("{id}.out"))
        .template(template)
        .build()
}

pub(crate) fn once_target(id: &str, template: &str) -> TargetDefinition {
    TargetDefinition::builder()
        .id(id)
        .file(format!("{id}.out"))
        .template(template)
        .once(true)
        .build()
}

pub(crate) fn resource_target(id: &str, template: &str) -> TargetDefinition {
    TargetDefinition::builder()
        .id(id)
        .file(id)
        .template(template)
        .resource(true)
        .build()
}

/// Environment, console, engine and registry for running one command.
pub(crate) struct Harness {
    pub env: Environment,
    pub console: ScriptedConsole,
    pub engine: FakeEngine,
    pub registry: CommandRegistry,
}

impl Harness {
    pub fn new(engine: FakeEngine) -> Self {
        Self {
            env: Environment::new(
                PathBuf::from("/work"),
                PathBuf::from("/opt/tsh/tsh"),
                "linux",
                &InstallConfig::default(),
            ),
            console: ScriptedConsole::default(),
            engine,
            registry: CommandRegistry::new(),
        }
    }

    /// Queue lines the command will read from the console.
    pub fn with_input(mut self, lines: &[&str]) -> Self {
        self.console = ScriptedConsole::new(lines.iter().copied());
        self
    }

    pub fn run(&mut self, command: &dyn Command, args: &[&str]) -> Result<(), CommandError> {
        let mut ctx = CommandContext {
            env: &mut self.env,
            console: &mut self.console,
            engine: &self.engine,
            registry: &self.registry,
        };
        command.execute(&mut ctx, args)
    }

    pub fn output(&self) -> String {
        self.console.output()
    }
}
