//! Terminal console backed by a line editor.
//!
//! Input goes through `rustyline`: history, line editing and completion of
//! command names. Ctrl-D ends the session; Ctrl-C abandons the current line,
//! which the shell ignores and a confirmation reads as a "no".

use std::io;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::debug;
use tsh_core::{Console, CoreError};

/// Completes the first word of a line with a registered command name.
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn candidates(&self, prefix: &str) -> Vec<Pair> {
        if prefix.contains(char::is_whitespace) {
            return Vec::new();
        }
        self.commands
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

/// Interactive console on the controlling terminal.
pub struct LineConsole {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl LineConsole {
    /// Create a console completing the given command names.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new(commands: Vec<String>) -> rustyline::Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CommandHelper { commands }));
        Ok(Self { editor })
    }
}

impl Console for LineConsole {
    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CoreError> {
        let line = read_outcome(self.editor.readline(prompt))?;
        if let Some(entry) = line.as_deref().filter(|l| !l.is_empty())
            && let Err(e) = self.editor.add_history_entry(entry)
        {
            debug!(error = %e, "history entry dropped");
        }
        Ok(line)
    }
}

/// Map an editor read to the console contract: trimmed line, `None` at end
/// of input, an empty line when interrupted.
fn read_outcome(result: rustyline::Result<String>) -> Result<Option<String>, CoreError> {
    match result {
        Ok(line) => Ok(Some(line.trim().to_owned())),
        Err(ReadlineError::Eof) => Ok(None),
        Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
        Err(ReadlineError::Io(e)) => Err(CoreError::Io(e)),
        Err(e) => Err(CoreError::Io(io::Error::other(e.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper {
            commands: ["pwd", "cd", "h", "env", "gh", "gen", "help"]
                .map(String::from)
                .to_vec(),
        }
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_should_complete_command_names_by_prefix() {
        let helper = helper();

        assert_eq!(replacements(helper.candidates("ge")), vec!["gen"]);
        assert_eq!(replacements(helper.candidates("h")), vec!["h", "help"]);
        assert_eq!(helper.candidates("").len(), 7);
        assert!(helper.candidates("x").is_empty());
    }

    #[test]
    fn test_should_not_complete_arguments() {
        assert!(helper().candidates("gen ").is_empty());
        assert!(helper().candidates("cd g").is_empty());
    }

    #[test]
    fn test_should_trim_read_lines() {
        let line = read_outcome(Ok("  gen * java \r".to_owned())).expect("should read");

        assert_eq!(line.as_deref(), Some("gen * java"));
    }

    #[test]
    fn test_should_end_input_on_eof() {
        assert!(read_outcome(Err(ReadlineError::Eof)).expect("should read").is_none());
    }

    #[test]
    fn test_should_turn_interrupt_into_empty_line() {
        let line = read_outcome(Err(ReadlineError::Interrupted)).expect("should read");

        assert_eq!(line.as_deref(), Some(""));
    }

    #[test]
    fn test_should_report_io_failures() {
        let err = read_outcome(Err(ReadlineError::Io(io::Error::other("tty gone")))).unwrap_err();

        assert!(matches!(err, CoreError::Io(_)));
    }
}
