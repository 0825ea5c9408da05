//! The interactive shell and batch runner.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parley_command::Engine;
use parley_foundation::{Error, Result, Value};

use crate::builtins::Builtins;
use crate::config::ShellConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};

/// A read-dispatch-print loop over an [`Engine`].
pub struct Shell<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The engine commands are dispatched through.
    engine: Engine,

    /// Prompt, banner, and history settings.
    config: ShellConfig,

    /// Set by the `exit` built-in.
    exit: Arc<AtomicBool>,
}

impl Shell<RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize or its history
    /// file cannot be read.
    pub fn new(config: ShellConfig) -> Result<Self> {
        let mut editor = RustylineEditor::new()?;
        if let Some(path) = &config.history_file {
            editor.load_history(path)?;
        }
        Self::with_editor(editor, config)
    }
}

impl<E: LineEditor> Shell<E> {
    /// Creates a shell with the given editor and a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in commands cannot be registered.
    pub fn with_editor(editor: E, config: ShellConfig) -> Result<Self> {
        let engine = Engine::with_config(config.engine);
        let exit = Arc::new(AtomicBool::new(false));
        Builtins::register(&engine, Arc::clone(&exit))?;
        Ok(Self {
            editor,
            engine,
            config,
            exit,
        })
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.config.banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    /// The engine, for registering application commands.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The shell's configuration.
    #[must_use]
    pub const fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Returns true once `exit` or `quit` has run.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    /// Runs the shell loop until EOF or `exit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails or history cannot be saved.
    pub fn run(&mut self) -> Result<()> {
        if self.config.banner {
            print_banner();
        }

        loop {
            match self.read_dispatch_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e),
            }
        }

        if let Some(path) = &self.config.history_file {
            self.editor.save_history(path)?;
        }
        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-dispatch-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_dispatch_print(&mut self) -> Result<bool> {
        if self.is_exiting() {
            return Ok(false);
        }

        let mut commands = self.engine.command_names();
        commands.extend(
            self.engine
                .get_commands(None)
                .iter()
                .flat_map(|d| d.aliases.clone()),
        );
        self.editor.set_commands(commands);

        let line = match self.editor.read_line(&self.config.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if line.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&line);

        match self.execute(&line) {
            Ok(Some(value)) => print_value(&value),
            Ok(None) => {}
            Err(e) => print_error(&e),
        }

        Ok(!self.is_exiting())
    }

    /// Dispatches one line.
    ///
    /// # Errors
    ///
    /// Returns any resolution, binding, or invocation error.
    pub fn execute(&mut self, line: &str) -> Result<Option<Value>> {
        self.engine.dispatch(line)
    }

    /// Runs every line of a script, stopping at the first error.
    ///
    /// Blank lines and lines whose first non-blank character is `#` are
    /// skipped. Returns the number of lines dispatched.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or the first
    /// dispatch error annotated with its line number.
    pub fn run_script(&mut self, path: &Path) -> Result<usize> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::from(io::Error::new(
                e.kind(),
                format!("failed to read {}: {e}", path.display()),
            ))
        })?;
        log::debug!("running script {}", path.display());
        self.run_source(&source)
    }

    /// Runs every line of `source` as a script.
    ///
    /// # Errors
    ///
    /// See [`Shell::run_script`].
    pub fn run_source(&mut self, source: &str) -> Result<usize> {
        let mut dispatched = 0;
        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let result = self.execute(line).map_err(|e| e.at_line(index + 1))?;
            dispatched += 1;
            if let Some(value) = result {
                print_value(&value);
            }
            if self.is_exiting() {
                break;
            }
        }
        Ok(dispatched)
    }
}

fn print_value(value: &Value) {
    if !value.is_nil() {
        println!("{value}");
    }
}

fn print_error(error: &Error) {
    match &error.context {
        Some(context) => eprintln!("\x1b[31mError: {error}\x1b[0m ({context})"),
        None => eprintln!("\x1b[31mError: {error}\x1b[0m"),
    }
}

fn print_banner() {
    println!("\x1b[1;36mParley v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
    println!("Type `help` to list commands. Use Ctrl+D or `exit` to leave.\n");

    // Flush to ensure banner appears
    let _ = io::stdout().flush();
}
