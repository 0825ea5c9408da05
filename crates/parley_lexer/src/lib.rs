//! Command-line tokenizer for Parley.
//!
//! Turns a raw input line into positioned tokens. Token 0 of a line is the
//! command name or alias; the rest are positional arguments.
//!
//! # Grammar
//!
//! - Tokens are separated by any whitespace.
//! - `"…"` and `'…'` quote text, which may resume in the middle of a word
//!   (`abc"de f"ghi` is the single token `abcde fghi`).
//! - A doubled quote character (`""` or `''`) is one literal quote.
//! - `#` starts a comment only while a word is being accumulated; a token
//!   that begins with `#` is an ordinary word.
//! - Unterminated quotes are tolerated; the lexer never fails.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexer;
pub mod token;


pub use lexer::{Lexer, escape_string, tokenize};
pub use token::Token;
