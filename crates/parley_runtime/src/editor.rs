//! Line editor abstraction for the shell.
//!
//! The shell reads through the [`LineEditor`] trait so that tests can feed
//! it scripted input; [`RustylineEditor`] is the interactive implementation.

use std::borrow::Cow;
use std::path::Path;

use parley_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set the command names offered for completion.
    fn set_commands(&mut self, commands: Vec<String>);

    /// Load history from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn load_history(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Save history to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save_history(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn editor_error(e: &ReadlineError) -> Error {
    Error::new(ErrorKind::Internal(e.to_string()))
}

#[derive(Helper, Completer, Hinter, Validator)]
struct ParleyHelper {
    #[rustyline(Completer)]
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl Highlighter for ParleyHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        false
    }
}

/// Completes command names in the first word and file paths inside quotes.
struct CommandCompleter {
    file_completer: FilenameCompleter,
    commands: Vec<String>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            file_completer: FilenameCompleter::new(),
            commands: Vec::new(),
        }
    }

    fn candidates(&self, word: &str) -> Vec<Pair> {
        let folded = word.to_lowercase();
        self.commands
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&folded))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);

        if before.chars().filter(|&c| c == '"').count() % 2 == 1 {
            return self.file_completer.complete(line, pos, ctx);
        }

        // Only the first word names a command.
        if before[..start].trim().is_empty() {
            Ok((start, self.candidates(&before[start..])))
        } else {
            Ok((pos, Vec::new()))
        }
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ParleyHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| editor_error(&e))?
            .build();

        let helper = ParleyHelper {
            completer: CommandCompleter::new(),
            hinter: HistoryHinter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(|e| editor_error(&e))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(editor_error(&e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_commands(&mut self, commands: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.commands = commands;
        }
    }

    fn load_history(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        self.editor.load_history(path).map_err(|e| editor_error(&e))
    }

    fn save_history(&mut self, path: &Path) -> Result<()> {
        self.editor.save_history(path).map_err(|e| editor_error(&e))
    }
}
