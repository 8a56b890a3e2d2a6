use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tsh_core::{
    CommandRegistry, Environment, InstallConfig, LoopControl, ProjectEngine, Shell,
    install_location, load_install_config,
};

use crate::console::LineConsole;

#[derive(Debug, Parser)]
#[command(name = "tsh", version, about = "Interactive shell for template-based code generation")]
pub struct Cli {
    /// Home directory of the project (defaults to none; bundles and models
    /// are then looked up in the current directory)
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// Model to select at startup
    #[arg(short, long)]
    pub model: Option<String>,

    /// Bundle to select at startup
    #[arg(short, long)]
    pub bundle: Option<String>,

    /// Also write JSON logs to `.tsh/logs/` under the project directory
    #[arg(long)]
    pub log_file: bool,

    /// Run the given command line instead of the interactive loop
    /// (repeatable, executed in order)
    #[arg(short, long = "command", value_name = "LINE")]
    pub command: Vec<String>,
}

impl Cli {
    /// Directory holding the `.tsh/logs` tree: `--home` if given, else the
    /// working directory.
    pub fn log_root(&self) -> Result<PathBuf> {
        match &self.home {
            Some(home) => Ok(home.clone()),
            None => std::env::current_dir().context("failed to read the current directory"),
        }
    }

    pub fn run(self) -> Result<()> {
        let install = install_location().context("cannot start without an installation location")?;
        let config_path = InstallConfig::path_for(&install);
        let config = load_install_config(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?;

        let mut env = Environment::detect(&config).context("failed to detect the environment")?;
        if let Some(home) = &self.home {
            let home = home
                .canonicalize()
                .with_context(|| format!("home directory not found: {}", home.display()))?;
            env.set_home_directory(home);
            env.reset_current_directory_to_home_if_defined();
        }

        let registry = CommandRegistry::standard()?;
        let engine = ProjectEngine::new(&config);
        let names = registry
            .groups()
            .iter()
            .flat_map(|group| group.commands().iter().map(|name| (*name).to_owned()))
            .collect();
        let console = LineConsole::new(names).context("failed to open the terminal")?;
        let mut shell = Shell::new(env, registry, engine, console);

        // Startup selections go through the commands so they are validated.
        if let Some(model) = &self.model {
            shell.execute_line(&format!("m {model}"));
        }
        if let Some(bundle) = &self.bundle {
            shell.execute_line(&format!("b {bundle}"));
        }

        if self.command.is_empty() {
            shell.run()?;
            return Ok(());
        }

        info!(lines = self.command.len(), "running command lines");
        for line in &self.command {
            if shell.execute_line(line) == LoopControl::Exit {
                break;
            }
        }
        Ok(())
    }
}
