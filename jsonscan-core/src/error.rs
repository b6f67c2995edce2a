use std::fmt;

use crate::span::Position;

/// Why a parse failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A scalar that is not valid in the current scanning context.
    InvalidCharacter,
    /// The input ended, or an object failed its key/value parity check, before a construct was
    /// complete. The offset points at the start of the unfinished construct.
    PartialInputProvided,
    /// A bare value at the document root while parsing strictly.
    RootLevelMustBeAContainer,
    /// A number-shaped token that does not convert to an `i64` or a finite `f64`.
    InvalidNumberPrimitive,
    /// A container nested deeper than the configured limit.
    NestingTooDeep,
}

impl ErrorKind {
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::InvalidCharacter => "invalid character",
            ErrorKind::PartialInputProvided => "partial input provided",
            ErrorKind::RootLevelMustBeAContainer => "root level must be an array or an object",
            ErrorKind::InvalidNumberPrimitive => "invalid number",
            ErrorKind::NestingTooDeep => "nesting too deep",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A failed parse: the reason and the scalar offset it was detected at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub offset: Position,
}

impl ParseError {
    pub const fn new(kind: ErrorKind, offset: Position) -> Self {
        ParseError { kind, offset }
    }

    pub(crate) const fn invalid_character(offset: Position) -> Self {
        Self::new(ErrorKind::InvalidCharacter, offset)
    }

    pub(crate) const fn partial_input(offset: Position) -> Self {
        Self::new(ErrorKind::PartialInputProvided, offset)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl std::error::Error for ParseError {}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
