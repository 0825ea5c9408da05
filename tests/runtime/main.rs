//! Integration tests for the parley_runtime crate.
//!
//! Tests for the shell built on the public API:
//! - Configuration files
//! - Scripted sessions through a mock line editor
//! - Batch scripts

mod config_tests;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use parley_foundation::Result;
use parley_runtime::{LineEditor, ReadResult};

/// What a [`MockEditor`] saw during a session.
#[derive(Default)]
pub struct Transcript {
    pub prompts: Vec<String>,
    pub history: Vec<String>,
    pub commands: Vec<String>,
}

/// Feeds scripted input to a shell and records what the shell did with it.
pub struct MockEditor {
    inputs: Vec<ReadResult>,
    transcript: Rc<RefCell<Transcript>>,
}

impl MockEditor {
    pub fn new(lines: &[&str]) -> (Self, Rc<RefCell<Transcript>>) {
        let inputs = lines
            .iter()
            .map(|line| ReadResult::Line((*line).to_string()))
            .collect();
        Self::with_inputs(inputs)
    }

    pub fn with_inputs(mut inputs: Vec<ReadResult>) -> (Self, Rc<RefCell<Transcript>>) {
        inputs.reverse();
        let transcript = Rc::new(RefCell::new(Transcript::default()));
        let editor = Self {
            inputs,
            transcript: Rc::clone(&transcript),
        };
        (editor, transcript)
    }
}

impl LineEditor for MockEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        self.transcript.borrow_mut().prompts.push(prompt.to_string());
        Ok(self.inputs.pop().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.transcript.borrow_mut().history.push(line.to_string());
    }

    fn set_commands(&mut self, commands: Vec<String>) {
        self.transcript.borrow_mut().commands = commands;
    }
}

/// A path in the system temp directory unique to this process and test.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("parley-{}-{name}", std::process::id()))
}
