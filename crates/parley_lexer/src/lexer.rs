//! Lexer for Parley command lines.
//!
//! A five-state scanner over the characters of one line. The lexer keeps no
//! state between lines and never fails: malformed quoting still yields
//! best-effort tokens.

use std::iter::{Enumerate, Peekable};
use std::str::Chars;

use crate::token::Token;

/// Scanner state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Between tokens (start state).
    Whitespace,
    /// Accumulating an unquoted run of a token.
    Word,
    /// Inside `"…"`.
    DoubleQuote,
    /// Inside `'…'`.
    SingleQuote,
    /// Rest of the line is discarded.
    Comment,
}

/// Lexer for a single command line.
///
/// Iterates over the line and produces [`Token`]s. Token indexes are
/// character (not byte) offsets into the line.
pub struct Lexer<'src> {
    /// Remaining characters with their character offsets.
    chars: Peekable<Enumerate<Chars<'src>>>,
    /// Current scanner state.
    state: State,
    /// Offset where the token being built started.
    start: usize,
    /// Text of the token being built.
    text: String,
    /// Number of tokens produced so far.
    emitted: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given line.
    #[must_use]
    pub fn new(line: &'src str) -> Self {
        Self {
            chars: line.chars().enumerate().peekable(),
            state: State::Whitespace,
            start: 0,
            text: String::new(),
            emitted: 0,
        }
    }

    /// Returns the next token, or `None` once the line is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        while let Some((index, c)) = self.chars.next() {
            match self.state {
                State::Whitespace => {
                    if c.is_whitespace() {
                        continue;
                    }
                    self.start = index;
                    match c {
                        '"' => self.state = State::DoubleQuote,
                        '\'' => self.state = State::SingleQuote,
                        // Only a line's first token may start with `#`.
                        '#' if self.emitted > 0 => self.state = State::Comment,
                        _ => {
                            self.text.push(c);
                            self.state = State::Word;
                        }
                    }
                }
                State::Word => match c {
                    c if c.is_whitespace() => {
                        self.state = State::Whitespace;
                        return Some(self.emit());
                    }
                    '"' => self.quote_in_word(c, State::DoubleQuote),
                    '\'' => self.quote_in_word(c, State::SingleQuote),
                    '#' => {
                        self.state = State::Comment;
                        return Some(self.emit());
                    }
                    _ => self.text.push(c),
                },
                State::DoubleQuote | State::SingleQuote => {
                    let closing = if self.state == State::DoubleQuote {
                        '"'
                    } else {
                        '\''
                    };
                    if c != closing {
                        self.text.push(c);
                    } else if self.take_doubled(c) {
                        self.text.push(c);
                    } else {
                        // Quoted text may run straight into more word characters.
                        self.state = State::Word;
                    }
                }
                State::Comment => {
                    self.chars.by_ref().for_each(drop);
                }
            }
        }

        match self.state {
            State::Word | State::DoubleQuote | State::SingleQuote => {
                self.state = State::Whitespace;
                Some(self.emit())
            }
            State::Whitespace | State::Comment => None,
        }
    }

    /// Tokenizes a whole line.
    #[must_use]
    pub fn tokenize_all(line: &str) -> Vec<Token> {
        let tokens: Vec<Token> = Lexer::new(line).collect();
        log::trace!("tokenized {line:?} into {} tokens", tokens.len());
        tokens
    }

    /// Handles a quote character met while accumulating a word.
    fn quote_in_word(&mut self, quote: char, quoted: State) {
        if self.take_doubled(quote) {
            self.text.push(quote);
        } else {
            self.state = quoted;
        }
    }

    /// Consumes the next character if it repeats `quote`.
    fn take_doubled(&mut self, quote: char) -> bool {
        self.chars.next_if(|&(_, next)| next == quote).is_some()
    }

    /// Finishes the token being built.
    fn emit(&mut self) -> Token {
        self.emitted += 1;
        Token::new(self.start, std::mem::take(&mut self.text))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenizes a line; `None` and `""` both yield no tokens.
#[must_use]
pub fn tokenize<'a>(line: impl Into<Option<&'a str>>) -> Vec<Token> {
    line.into().map(Lexer::tokenize_all).unwrap_or_default()
}

/// Quotes a string so that it lexes back to exactly one token.
///
/// Wraps `s` in double quotes and doubles every embedded double quote.
/// No other characters are escaped.
#[must_use]
pub fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('"');
    for c in s.chars() {
        if c == '"' {
            escaped.push('"');
        }
        escaped.push(c);
    }
    escaped.push('"');
    escaped
}
