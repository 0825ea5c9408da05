//! Integration tests for the parley_lexer crate.
//!
//! Tests for command-line tokenization:
//! - Word splitting and offsets
//! - Quoting and doubled quotes
//! - Comments
//! - Escaping

mod escape_tests;
mod tokenizer_tests;
