//! Line-based console boundary.
//!
//! Commands never touch stdin/stdout directly: they print and prompt
//! through a [`Console`], so a session can be driven by a script in tests.

use std::collections::VecDeque;

use crate::error::CoreError;

/// Line-oriented input and output used by the shell and its commands.
pub trait Console {
    /// Write `text` followed by a line break.
    fn print(&mut self, text: &str);

    /// Show `prompt` and block until one line is read.
    ///
    /// Returns the trimmed line, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if reading fails.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CoreError>;

    /// Ask a yes/no question. Any answer starting with `y` or `Y` confirms;
    /// everything else, including end of input, declines.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if reading fails.
    fn confirm(&mut self, question: &str) -> Result<bool, CoreError> {
        let answer = self.read_line(&format!("{question} [y/n] ? "))?;
        Ok(answer.is_some_and(|a| a.starts_with(['y', 'Y'])))
    }
}

/// In-memory console fed with predefined input lines.
///
/// Everything printed and every prompt shown is recorded, in order, in the
/// transcript.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Printed lines and prompts, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// The transcript joined with line breaks.
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    /// Input lines not consumed yet.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.transcript.push(text.to_owned());
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CoreError> {
        self.transcript.push(prompt.to_owned());
        Ok(self.input.pop_front().map(|line| line.trim().to_owned()))
    }
}
