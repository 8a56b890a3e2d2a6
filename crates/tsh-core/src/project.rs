//! Filesystem-backed generation engine.
//!
//! [`ProjectEngine`] finds bundles and models under `<project>/.tsh/`:
//!
//! ```text
//! <project>/.tsh/templates/<bundle>/templates.cfg
//! <project>/.tsh/models/<model>/<Entity>.entity
//! ```
//!
//! Only the entity index of a model is read (one `.entity` file per entity,
//! named after its class). Rendering is delegated to the external program
//! configured as `generatorCommand`: it is invoked as
//! `<generatorCommand> generate <project>`, receives the
//! [`GenerationRequest`] as JSON on stdin and must print a
//! [`GenerationResult`] as JSON on stdout.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, instrument, warn};
use tsh_bundle::TargetsDefinitions;

use crate::config::InstallConfig;
use crate::engine::{GenerationRequest, GenerationResult, GeneratorEngine, Model};
use crate::error::EngineError;

/// Project metadata directory.
pub const PROJECT_DIR: &str = ".tsh";

const ENTITY_EXTENSION: &str = "entity";

/// Engine reading bundles and models from the project directory.
#[derive(Debug, Clone, Default)]
pub struct ProjectEngine {
    generator_command: Option<String>,
}

impl ProjectEngine {
    /// Create an engine using the generator declared in `config`.
    pub fn new(config: &InstallConfig) -> Self {
        Self {
            generator_command: config.generator_command.clone(),
        }
    }

    /// Returns `<project>/.tsh/templates/<bundle>`.
    pub fn bundle_dir(project: &Path, bundle: &str) -> PathBuf {
        project.join(PROJECT_DIR).join("templates").join(bundle)
    }

    /// Returns `<project>/.tsh/models/<model>`.
    pub fn model_dir(project: &Path, model: &str) -> PathBuf {
        project.join(PROJECT_DIR).join("models").join(model)
    }
}

impl GeneratorEngine for ProjectEngine {
    #[instrument(skip(self))]
    fn load_model(&self, project: &Path, name: &str) -> Result<Model, EngineError> {
        check_name("model", name)?;
        let dir = Self::model_dir(project, name);
        if !dir.is_dir() {
            return Err(EngineError::Tool(format!(
                "model '{name}' not found ({})",
                dir.display()
            )));
        }

        let mut class_names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTITY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                class_names.push(stem.to_owned());
            }
        }
        class_names.sort();

        debug!(model = name, entities = class_names.len(), "model loaded");
        Ok(Model::new(name, class_names))
    }

    #[instrument(skip(self))]
    fn target_definitions(
        &self,
        project: &Path,
        bundle: &str,
    ) -> Result<TargetsDefinitions, EngineError> {
        check_name("bundle", bundle)?;
        let dir = Self::bundle_dir(project, bundle);
        if !dir.is_dir() {
            return Err(EngineError::Tool(format!(
                "bundle '{bundle}' not found ({})",
                dir.display()
            )));
        }
        Ok(tsh_bundle::load_catalog(&dir)?)
    }

    #[instrument(skip_all, fields(bundle = request.bundle(), targets = request.targets().len()))]
    fn launch_generation(
        &self,
        project: &Path,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, EngineError> {
        let Some(command_line) = self.generator_command.as_deref() else {
            return Err(EngineError::Tool(
                "no generator configured (set 'generatorCommand' in tsh.yaml)".to_owned(),
            ));
        };
        let mut parts = command_line.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(EngineError::Tool("'generatorCommand' is empty".to_owned()));
        };

        let payload = serde_json::to_vec(request)
            .map_err(|e| EngineError::Tool(format!("cannot encode generation request: {e}")))?;

        debug!(program, bytes = payload.len(), "starting generator");
        let mut child = Command::new(program)
            .args(parts)
            .arg("generate")
            .arg(project)
            .current_dir(project)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is fed from its own thread while stdout and stderr drain here.
        let writer = child
            .stdin
            .take()
            .map(|mut stdin| thread::spawn(move || stdin.write_all(&payload)));
        let output = child.wait_with_output()?;
        let written = match writer {
            Some(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("generator stdin writer panicked"))),
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = ?output.status.code(), "generator failed");
            return Err(EngineError::Generation(format!(
                "generator exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        written?;

        let result: GenerationResult = serde_json::from_slice(&output.stdout)?;
        debug!(
            files = result.files_generated,
            errors = result.error_count(),
            "generator finished"
        );
        Ok(result)
    }
}

/// Reject names that would escape the project metadata directory.
fn check_name(kind: &str, name: &str) -> Result<(), EngineError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(EngineError::Tool(format!("invalid {kind} name '{name}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn project_with_model(entities: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("should create temp dir");
        let model_dir = ProjectEngine::model_dir(dir.path(), "garage");
        fs::create_dir_all(&model_dir).expect("should create model dir");
        for entity in entities {
            fs::write(model_dir.join(format!("{entity}.entity")), "").expect("should write entity");
        }
        dir
    }

    fn request() -> GenerationRequest {
        GenerationRequest::builder()
            .model(Model::new("garage", ["Car"]))
            .entity_names(vec!["Car".to_owned()])
            .bundle("java")
            .targets(Vec::new())
            .build()
    }

    #[test]
    fn test_should_load_entity_index_sorted() {
        let dir = project_with_model(&["Driver", "Car"]);
        fs::write(
            ProjectEngine::model_dir(dir.path(), "garage").join("notes.txt"),
            "ignored",
        )
        .expect("should write notes");

        let model = ProjectEngine::default()
            .load_model(dir.path(), "garage")
            .expect("should load model");

        assert_eq!(model.name, "garage");
        assert_eq!(model.entity_names(), vec!["Car", "Driver"]);
    }

    #[test]
    fn test_should_fail_for_unknown_model() {
        let dir = TempDir::new().expect("should create temp dir");

        let err = ProjectEngine::default()
            .load_model(dir.path(), "nope")
            .unwrap_err();

        assert!(!err.is_generation());
        assert!(err.to_string().contains("model 'nope' not found"));
    }

    #[test]
    fn test_should_reject_path_like_names() {
        let dir = TempDir::new().expect("should create temp dir");
        let engine = ProjectEngine::default();

        assert!(engine.load_model(dir.path(), "../etc").is_err());
        assert!(engine.target_definitions(dir.path(), "..").is_err());
    }

    #[test]
    fn test_should_read_bundle_catalog() {
        let dir = TempDir::new().expect("should create temp dir");
        let bundle_dir = ProjectEngine::bundle_dir(dir.path(), "java");
        fs::create_dir_all(&bundle_dir).expect("should create bundle dir");
        fs::write(
            bundle_dir.join(tsh_bundle::CATALOG_FILE),
            "Bean ; ${BEANNAME}.java ; src ; bean_java.vm\nLogo ; logo.png ; static ; logo.png ; R\n",
        )
        .expect("should write catalog");

        let catalog = ProjectEngine::default()
            .target_definitions(dir.path(), "java")
            .expect("should read catalog");

        assert_eq!(catalog.templates().len(), 1);
        assert_eq!(catalog.resources().len(), 1);
    }

    #[test]
    fn test_should_fail_for_unknown_bundle() {
        let dir = TempDir::new().expect("should create temp dir");

        let err = ProjectEngine::default()
            .target_definitions(dir.path(), "missing")
            .unwrap_err();

        assert!(err.to_string().contains("bundle 'missing' not found"));
    }

    #[test]
    fn test_should_require_generator_command() {
        let dir = TempDir::new().expect("should create temp dir");

        let err = ProjectEngine::default()
            .launch_generation(dir.path(), &request())
            .unwrap_err();

        assert!(matches!(err, EngineError::Tool(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_should_run_generator_and_parse_result() {
        let dir = TempDir::new().expect("should create temp dir");
        let script = dir.path().join("gen.sh");
        fs::write(
            &script,
            "cat > request.json\necho '{\"filesGenerated\": 1, \"resourcesCopied\": 0, \"errors\": []}'\n",
        )
        .expect("should write script");

        let engine = ProjectEngine::new(&InstallConfig {
            generator_command: Some(format!("sh {}", script.display())),
            ..InstallConfig::default()
        });
        let result = engine
            .launch_generation(dir.path(), &request())
            .expect("should generate");

        assert_eq!(result.files_generated, 1);
        let sent = fs::read_to_string(dir.path().join("request.json")).expect("should read request");
        assert!(sent.contains("\"entityNames\":[\"Car\"]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_should_report_generator_failure() {
        let dir = TempDir::new().expect("should create temp dir");
        let script = dir.path().join("fail.sh");
        fs::write(&script, "cat > /dev/null\necho 'template crashed' >&2\nexit 3\n")
            .expect("should write script");

        let engine = ProjectEngine::new(&InstallConfig {
            generator_command: Some(format!("sh {}", script.display())),
            ..InstallConfig::default()
        });
        let err = engine
            .launch_generation(dir.path(), &request())
            .unwrap_err();

        assert!(err.is_generation());
        assert!(err.to_string().contains("template crashed"));
    }

    /// A request whose JSON is far larger than a pipe buffer.
    fn large_request() -> GenerationRequest {
        let names: Vec<String> = (0..20_000).map(|i| format!("Entity{i}")).collect();
        GenerationRequest::builder()
            .model(Model::new("garage", names.clone()))
            .entity_names(names)
            .bundle("java")
            .targets(Vec::new())
            .build()
    }

    fn script_engine(dir: &Path, body: &str) -> ProjectEngine {
        let script = dir.join("generator.sh");
        fs::write(&script, body).expect("should write script");
        ProjectEngine::new(&InstallConfig {
            generator_command: Some(format!("sh {}", script.display())),
            ..InstallConfig::default()
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_should_report_stderr_when_generator_exits_without_reading() {
        let dir = TempDir::new().expect("should create temp dir");
        let engine = script_engine(dir.path(), "echo 'bad bundle config' >&2\nexit 2\n");

        let err = engine
            .launch_generation(dir.path(), &large_request())
            .unwrap_err();

        assert!(err.is_generation(), "unexpected error: {err}");
        assert!(err.to_string().contains("bad bundle config"));
    }

    #[cfg(unix)]
    #[test]
    fn test_should_not_block_on_chatty_generator() {
        let dir = TempDir::new().expect("should create temp dir");
        let engine = script_engine(
            dir.path(),
            "head -c 200000 /dev/zero | tr '\\0' x >&2\ncat > /dev/null\necho '{\"filesGenerated\": 7}'\n",
        );

        let result = engine
            .launch_generation(dir.path(), &large_request())
            .expect("should generate");

        assert_eq!(result.files_generated, 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_should_report_malformed_generator_output() {
        let dir = TempDir::new().expect("should create temp dir");
        let engine = script_engine(dir.path(), "cat > /dev/null\necho 'not json'\n");

        let err = engine.launch_generation(dir.path(), &request()).unwrap_err();

        assert!(matches!(err, EngineError::Json(_)));
        assert!(err.to_string().starts_with("malformed generator output"));
    }
}
