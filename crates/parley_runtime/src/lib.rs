//! Interactive shell, batch runner, and CLI for Parley.
//!
//! This crate provides:
//! - [`Shell`] - Interactive read-dispatch-print loop over an [`Engine`]
//! - [`ShellConfig`] - TOML-backed shell and engine configuration
//! - Built-in shell commands (`help`, `describe`, `echo`, `escape`, `exit`)
//!
//! [`Engine`]: parley_command::Engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtins;
pub mod config;
pub mod editor;
pub mod shell;

pub use config::ShellConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use shell::Shell;
