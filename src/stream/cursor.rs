use std::fmt;

use crate::{
    core::source::CharSource,
    error::{JsonError, JsonResult},
};

/// Line and column (both 1-based) of the lookahead character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Renders a lookahead character for error messages.
pub(crate) fn describe(c: Option<char>) -> String {
    match c {
        Some(c) => format!("'{}'", c.escape_debug()),
        None => "end of input".to_string(),
    }
}

/// One character of lookahead over a [`CharSource`].
///
/// The cursor always holds the next unconsumed character (or end of input)
/// and never buffers anything beyond it.
pub struct Cursor<S> {
    source: S,
    current: Option<char>,
    position: Position,
}

impl<S: CharSource> Cursor<S> {
    /// Loads the first character of `source`.
    pub fn new(mut source: S) -> JsonResult<Self> {
        let current = source.next_char()?;
        Ok(Self {
            source,
            current,
            position: Position::default(),
        })
    }

    pub fn peek(&self) -> Option<char> {
        self.current
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Consumes the lookahead and loads the next character. Returns the
    /// consumed character, or `None` when already at end of input.
    pub fn bump(&mut self) -> JsonResult<Option<char>> {
        let consumed = self.current;
        if let Some(c) = consumed {
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
            self.current = self.source.next_char()?;
        }
        Ok(consumed)
    }

    pub fn skip_whitespace(&mut self) -> JsonResult<()> {
        while self.current.is_some_and(char::is_whitespace) {
            self.bump()?;
        }
        Ok(())
    }

    /// Consumes `expected` or fails with a grammar error.
    pub fn expect(&mut self, expected: char) -> JsonResult<()> {
        match self.current {
            Some(c) if c == expected => {
                self.bump()?;
                Ok(())
            }
            other => Err(self.grammar(format!(
                "expected '{}' but found {}",
                expected,
                describe(other)
            ))),
        }
    }

    pub fn grammar(&self, message: impl fmt::Display) -> JsonError {
        JsonError::Grammar(format!("{} at {}", message, self.position))
    }

    pub fn lexical(&self, message: impl fmt::Display) -> JsonError {
        JsonError::Lexical(format!("{} at {}", message, self.position))
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}
