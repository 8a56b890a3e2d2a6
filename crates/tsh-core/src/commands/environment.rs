//! Directory and environment commands: `pwd`, `cd`, `h`, `env`, `gh`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command::{Command, CommandContext, CommandError};

/// `pwd`: print the current directory.
#[derive(Debug, Clone, Copy)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn short_description(&self) -> &'static str {
        "Print working directory"
    }

    fn description(&self) -> &'static str {
        "Prints the current working directory"
    }

    fn usage(&self) -> &'static str {
        "pwd"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        if args.len() != 1 {
            return Err(self.invalid_usage());
        }
        let current = ctx.env.current_directory().display().to_string();
        ctx.print(current);
        Ok(())
    }
}

/// `cd [dir]`: change the current directory, or go back home.
#[derive(Debug, Clone, Copy)]
pub struct CdCommand;

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn short_description(&self) -> &'static str {
        "Change directory"
    }

    fn description(&self) -> &'static str {
        "Changes the current directory. Without argument, returns to the home directory if defined"
    }

    fn usage(&self) -> &'static str {
        "cd [directory]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [_] => ctx.env.reset_current_directory_to_home_if_defined(),
            [_, dir] => {
                let target = resolve_directory(ctx.env.current_directory(), dir)?;
                debug!(directory = %target.display(), "changing directory");
                ctx.env.set_current_directory(target);
            }
            _ => return Err(self.invalid_usage()),
        }
        let current = ctx.env.current_directory().display().to_string();
        ctx.print(current);
        Ok(())
    }
}

/// `h [dir|.]`: print or set the home directory.
#[derive(Debug, Clone, Copy)]
pub struct HomeCommand;

impl Command for HomeCommand {
    fn name(&self) -> &'static str {
        "h"
    }

    fn short_description(&self) -> &'static str {
        "Home directory"
    }

    fn description(&self) -> &'static str {
        "Prints or sets the home directory ('.' for the current directory); setting it also moves to it"
    }

    fn usage(&self) -> &'static str {
        "h [directory|.]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [_] => {}
            [_, "."] => ctx.env.set_home_directory_to_current(),
            [_, dir] => {
                let home = resolve_directory(ctx.env.current_directory(), dir)?;
                ctx.env.set_home_directory(home);
            }
            _ => return Err(self.invalid_usage()),
        }
        ctx.env.reset_current_directory_to_home_if_defined();

        let home = display_or_undefined(ctx.env.home_directory());
        ctx.print(format!("Home directory : {home}"));
        Ok(())
    }
}

/// `env`: print the whole session environment.
#[derive(Debug, Clone, Copy)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn name(&self) -> &'static str {
        "env"
    }

    fn short_description(&self) -> &'static str {
        "Show environment"
    }

    fn description(&self) -> &'static str {
        "Prints the installation facts and the current selections of the session"
    }

    fn usage(&self) -> &'static str {
        "env"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        if args.len() != 1 {
            return Err(self.invalid_usage());
        }
        let env = &*ctx.env;
        let lines = [
            format!("Operating system   : {}", env.os_name()),
            format!("Install location   : {}", env.install_location().display()),
            format!("Editor command     : {}", env.editor_command()),
            format!("Original directory : {}", env.original_directory().display()),
            format!("Home directory     : {}", display_or_undefined(env.home_directory())),
            format!("Current directory  : {}", env.current_directory().display()),
            format!("Current model      : {}", env.current_model().unwrap_or("undefined")),
            format!("Current bundle     : {}", env.current_bundle().unwrap_or("undefined")),
            format!("GitHub store       : {}", env.current_github_store()),
        ];
        for line in lines {
            ctx.print(line);
        }
        Ok(())
    }
}

/// `gh [store]`: print or set the GitHub template store.
#[derive(Debug, Clone, Copy)]
pub struct GitHubStoreCommand;

impl Command for GitHubStoreCommand {
    fn name(&self) -> &'static str {
        "gh"
    }

    fn short_description(&self) -> &'static str {
        "GitHub store"
    }

    fn description(&self) -> &'static str {
        "Prints or sets the GitHub store used to download bundles"
    }

    fn usage(&self) -> &'static str {
        "gh [store-name]"
    }

    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [_] => {}
            [_, store] => ctx.env.set_current_github_store(*store),
            _ => return Err(self.invalid_usage()),
        }
        let store = ctx.env.current_github_store().to_owned();
        ctx.print(format!("GitHub store : {store}"));
        Ok(())
    }
}

fn display_or_undefined(path: Option<&Path>) -> String {
    path.map_or_else(|| "undefined".to_owned(), |p| p.display().to_string())
}

/// Resolve `arg` against `current` and check it is an existing directory.
fn resolve_directory(current: &Path, arg: &str) -> Result<PathBuf, CommandError> {
    let candidate = current.join(arg);
    match candidate.canonicalize() {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(CommandError::InvalidArgument(format!(
            "Directory '{arg}' not found"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::testing::{FakeEngine, Harness};

    #[test]
    fn test_should_print_current_directory() {
        let mut h = Harness::new(FakeEngine::default());

        h.run(&PwdCommand, &["pwd"]).expect("should run");

        assert_eq!(h.output(), "/work");
        assert!(h.run(&PwdCommand, &["pwd", "x"]).is_err());
    }

    #[test]
    fn test_should_change_to_existing_directory() {
        let dir = tempfile::TempDir::new().expect("should create temp dir");
        std::fs::create_dir(dir.path().join("sub")).expect("should create sub dir");
        let root = dir.path().canonicalize().expect("should canonicalize");
        let mut h = Harness::new(FakeEngine::default());
        h.env.set_current_directory(root.clone());

        h.run(&CdCommand, &["cd", "sub"]).expect("should change directory");
        assert_eq!(h.env.current_directory(), root.join("sub"));

        h.run(&CdCommand, &["cd", ".."]).expect("should go up");
        assert_eq!(h.env.current_directory(), root);
    }

    #[test]
    fn test_should_reject_missing_directory() {
        let mut h = Harness::new(FakeEngine::default());
        h.env.set_current_directory(PathBuf::from("/nonexistent-base"));

        let err = h.run(&CdCommand, &["cd", "nowhere"]).unwrap_err();

        assert_eq!(err, CommandError::InvalidArgument("Directory 'nowhere' not found".to_owned()));
        assert_eq!(h.env.current_directory(), Path::new("/nonexistent-base"));
    }

    #[test]
    fn test_should_return_home_on_bare_cd() {
        let mut h = Harness::new(FakeEngine::default());
        h.run(&CdCommand, &["cd"]).expect("should run");
        assert_eq!(h.env.current_directory(), Path::new("/work"));

        h.env.set_home_directory(PathBuf::from("/projects/demo"));
        h.run(&CdCommand, &["cd"]).expect("should run");
        assert_eq!(h.env.current_directory(), Path::new("/projects/demo"));
    }

    #[test]
    fn test_should_print_undefined_home() {
        let mut h = Harness::new(FakeEngine::default());

        h.run(&HomeCommand, &["h"]).expect("should run");

        assert_eq!(h.output(), "Home directory : undefined");
        assert!(h.env.home_directory().is_none());
    }

    #[test]
    fn test_should_set_home_to_current_directory() {
        let mut h = Harness::new(FakeEngine::default());

        h.run(&HomeCommand, &["h", "."]).expect("should run");

        assert_eq!(h.env.home_directory(), Some(Path::new("/work")));
        assert_eq!(h.output(), "Home directory : /work");
    }

    #[test]
    fn test_should_set_home_and_move_to_it() {
        let dir = tempfile::TempDir::new().expect("should create temp dir");
        let root = dir.path().canonicalize().expect("should canonicalize");
        let mut h = Harness::new(FakeEngine::default());

        h.run(&HomeCommand, &["h", root.to_str().expect("utf-8 path")])
            .expect("should set home");

        assert_eq!(h.env.home_directory(), Some(root.as_path()));
        assert_eq!(h.env.current_directory(), root);
    }

    #[test]
    fn test_should_print_environment() {
        let mut h = Harness::new(FakeEngine::default());
        h.env.set_current_model("garage");

        h.run(&EnvCommand, &["env"]).expect("should run");

        let out = h.output();
        assert!(out.contains("Editor command     : vi $FILE"));
        assert!(out.contains("Current model      : garage"));
        assert!(out.contains("Current bundle     : undefined"));
    }

    #[test]
    fn test_should_set_github_store() {
        let mut h = Harness::new(FakeEngine::default());

        h.run(&GitHubStoreCommand, &["gh", "my-templates"]).expect("should run");

        assert_eq!(h.env.current_github_store(), "my-templates");
        assert_eq!(h.output(), "GitHub store : my-templates");
    }
}
