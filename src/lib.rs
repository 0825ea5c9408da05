//! Parley - Command parsing and dispatch engine
//!
//! This crate re-exports all layers of the Parley system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parley_runtime    - Shell, batch runner, CLI, configuration
//! Layer 2: parley_command    - Converter chain, registry, binder, engine
//! Layer 1: parley_lexer      - Tokenizer and escaping
//! Layer 0: parley_foundation - Core types (Type, Value, Error)
//! ```

pub use parley_command as command;
pub use parley_foundation as foundation;
pub use parley_lexer as lexer;
pub use parley_runtime as runtime;
