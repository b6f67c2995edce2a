//! A forward-only cursor over a slice of Unicode scalar values, plus the scalar classes the
//! scanners dispatch on.

use crate::span::{Position, Span};

pub(crate) const OPEN_ARRAY: char = '[';
pub(crate) const CLOSE_ARRAY: char = ']';
pub(crate) const OPEN_OBJECT: char = '{';
pub(crate) const CLOSE_OBJECT: char = '}';
pub(crate) const SEPARATOR: char = ',';
pub(crate) const VALUE_DELIMITER: char = ':';
pub(crate) const DOUBLE_QUOTE: char = '"';
pub(crate) const SINGLE_QUOTE: char = '\'';

/// Space, line feed, the vertical-whitespace control set (VT, FF, CR, NEL) and horizontal tab.
pub const fn is_whitespace(scalar: char) -> bool {
    matches!(
        scalar,
        ' ' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\t'
    )
}

pub const fn is_quote(scalar: char) -> bool {
    matches!(scalar, DOUBLE_QUOTE | SINGLE_QUOTE)
}

/// Scalars that end a number or keyword without being part of it.
pub(crate) const fn is_terminator(scalar: char) -> bool {
    matches!(scalar, SEPARATOR | CLOSE_OBJECT | CLOSE_ARRAY) || is_whitespace(scalar)
}

/// The cursor borrows the input and only owns its current offset. Stepping never allocates.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    scalars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(scalars: &'a [char]) -> Self {
        Cursor { scalars, pos: 0 }
    }

    /// The scalar under the cursor, without moving.
    pub fn peek(&self) -> Option<char> {
        self.scalars.get(self.pos).copied()
    }

    /// Returns the scalar under the cursor and moves one scalar forward. At the end of input this
    /// returns `None` and the cursor stays put.
    pub fn advance(&mut self) -> Option<char> {
        let scalar = self.peek()?;
        self.pos += 1;
        Some(scalar)
    }

    pub fn position(&self) -> Position {
        Position(self.pos)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.scalars.len()
    }

    /// Collects the half-open range `[from, to)` into a string. An inverted or out-of-bounds range
    /// is clamped, so `from >= to` yields the empty string.
    pub fn slice(&self, from: Position, to: Position) -> String {
        let end = to.0.min(self.scalars.len());
        if from.0 >= end {
            return String::new();
        }
        self.scalars[from.0..end].iter().collect()
    }

    /// The span from `start` up to the current position.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position())
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Whether everything from the cursor to the end of input is whitespace. Does not move.
    pub fn rest_is_whitespace(&self) -> bool {
        self.scalars[self.pos.min(self.scalars.len())..]
            .iter()
            .all(|&scalar| is_whitespace(scalar))
    }

    /// Position just past the last non-whitespace scalar of the whole input, or `floor` if there
    /// is nothing but whitespace after it.
    pub(crate) fn trimmed_end(&self, floor: Position) -> Position {
        let mut end = self.scalars.len();
        while end > floor.0 && is_whitespace(self.scalars[end - 1]) {
            end -= 1;
        }
        Position(end.max(floor.0))
    }
}
