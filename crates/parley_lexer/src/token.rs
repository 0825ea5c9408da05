//! Tokens produced by the lexer.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A lexical unit of a command line.
///
/// Two tokens are equal iff their text is equal; the index only serves
/// diagnostics.
#[derive(Clone, Debug)]
pub struct Token {
    index: usize,
    text: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Character offset where this token began in its source line.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The token's text with quoting removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the token text is empty (e.g. `""`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the token, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
