//! A hand-rolled JSON scanner. Input is a sequence of already-decoded Unicode scalar values; the
//! scanner walks it once, tracking container nesting and the key/value phase of objects by hand,
//! and produces a [`Value`] tree or a [`ParseError`] that points at the offending scalar.
//!
//! Beyond plain JSON, string literals may be single-quoted, and in [`Strictness::Lenient`] mode
//! object keys may be left unquoted and the document root may be a bare literal:
//!
//! ```
//! use jsonscan_core::{from_str, Value};
//!
//! let v = from_str("{anInteger: 123, 'aFloatValue': 123.456}").unwrap();
//! assert_eq!(v.get("anInteger"), Some(&Value::Integer(123)));
//! assert_eq!(from_str("true").unwrap(), Value::Boolean(true));
//! ```
//!
//! Offsets in errors and spans count scalars, not bytes. Recursion depth equals container
//! nesting depth and is capped by [`ParseOptions::max_depth`].

mod container;
mod cursor;
mod error;
mod options;
mod parser;
mod primitive;
mod span;
mod value;

pub use cursor::{is_quote, is_whitespace, Cursor};
pub use error::{ErrorKind, ParseError, Result};
pub use options::{ParseOptions, Strictness, DEFAULT_MAX_DEPTH};
pub use parser::Parser;
pub use span::{Position, Span, Spanned};
pub use value::{Map, Value};

/// Parses `scalars` with `options`, returning the root value and the span it was read from.
pub fn parse(scalars: &[char], options: ParseOptions) -> Result<Spanned<Value>> {
    Parser::new(options).parse(scalars)
}

/// Like [`parse`], for text that is still a `&str`.
pub fn parse_str(input: &str, options: ParseOptions) -> Result<Spanned<Value>> {
    Parser::new(options).parse_str(input)
}

/// Parses `input` with the default options and keeps only the value.
pub fn from_str(input: &str) -> Result<Value> {
    parse_str(input, ParseOptions::default()).map(|root| root.val)
}
