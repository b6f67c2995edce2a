//! The structural driver: recognizes `[...]` and `{...}`, hands leaf tokens to the primitive
//! scanners and recurses into itself for nested containers.

use tracing::*;

use crate::cursor::{
    is_quote, is_whitespace, Cursor, CLOSE_ARRAY, CLOSE_OBJECT, OPEN_ARRAY, OPEN_OBJECT, SEPARATOR,
    VALUE_DELIMITER,
};
use crate::error::{ErrorKind, ParseError, Result};
use crate::options::ParseOptions;
use crate::primitive::{is_bare_key_start, scan_bare_key, scan_keyword, scan_number, scan_string};
use crate::span::Spanned;
use crate::value::{Map, Value};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ContainerKind {
    Array,
    Object,
}

/// Children read so far. For objects, `pending_key` is the key/value parity: it holds the key
/// of a member whose value has not been read yet.
enum Children {
    Array(Vec<Value>),
    Object {
        members: Map,
        pending_key: Option<String>,
    },
}

impl Children {
    fn new(kind: ContainerKind) -> Self {
        match kind {
            ContainerKind::Array => Children::Array(Vec::new()),
            ContainerKind::Object => Children::Object {
                members: Map::new(),
                pending_key: None,
            },
        }
    }

    fn expects_key(&self) -> bool {
        matches!(
            self,
            Children::Object {
                pending_key: None,
                ..
            }
        )
    }

    fn awaits_value_of_key(&self) -> bool {
        matches!(
            self,
            Children::Object {
                pending_key: Some(_),
                ..
            }
        )
    }

    /// Appends a string, which becomes the pending key when an object expects one.
    fn push_string(&mut self, s: String) {
        match self {
            Children::Object {
                pending_key: pending_key @ None,
                ..
            } => *pending_key = Some(s),
            _ => self.push_value(Value::String(s)),
        }
    }

    /// Appends a value. Callers only do this outside of key position.
    fn push_value(&mut self, value: Value) {
        match self {
            Children::Array(elements) => elements.push(value),
            Children::Object {
                members,
                pending_key,
            } => {
                if let Some(key) = pending_key.take() {
                    members.insert(key, value);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Children::Array(elements) => Value::Array(elements),
            Children::Object { members, .. } => Value::Object(members),
        }
    }
}

/// Scans the container whose opening bracket is under the cursor. `depth` is the nesting level
/// of this container, 1 for the document root.
pub(crate) fn scan_container(
    cursor: &mut Cursor<'_>,
    options: &ParseOptions,
    depth: usize,
) -> Result<Spanned<Value>> {
    let start = cursor.position();
    let kind = match cursor.advance() {
        Some(OPEN_ARRAY) => ContainerKind::Array,
        Some(OPEN_OBJECT) => ContainerKind::Object,
        Some(_) => return Err(ParseError::invalid_character(start)),
        None => return Err(ParseError::partial_input(start)),
    };
    if options.max_depth.is_some_and(|max| depth > max) {
        debug!(%start, depth, "container nested too deep");
        return Err(ParseError::new(ErrorKind::NestingTooDeep, start));
    }
    trace!(%start, ?kind, depth, "entering container");

    let mut children = Children::new(kind);

    loop {
        let here = cursor.position();
        let Some(scalar) = cursor.peek() else {
            return Err(ParseError::partial_input(start));
        };

        match scalar {
            CLOSE_ARRAY if kind == ContainerKind::Array => {
                cursor.advance();
                break;
            }
            CLOSE_OBJECT if kind == ContainerKind::Object => {
                if children.awaits_value_of_key() {
                    // A key without a value: the object itself is malformed.
                    return Err(ParseError::partial_input(start));
                }
                cursor.advance();
                break;
            }
            VALUE_DELIMITER if children.awaits_value_of_key() => {
                cursor.advance();
            }
            SEPARATOR => {
                cursor.advance();
            }
            c if is_whitespace(c) => {
                cursor.advance();
            }
            c if is_quote(c) => {
                let s = scan_string(cursor, options.decode_escapes)?;
                children.push_string(s.val);
            }
            c if children.expects_key() => {
                if options.is_strict() || !is_bare_key_start(c) {
                    return Err(ParseError::invalid_character(here));
                }
                let key = scan_bare_key(cursor)?;
                children.push_string(key.val);
            }
            '-' | '0'..='9' => {
                let n = scan_number(cursor)?;
                children.push_value(n.val);
            }
            't' | 'f' | 'n' => {
                let keyword = scan_keyword(cursor)?;
                children.push_value(keyword.val);
            }
            OPEN_ARRAY | OPEN_OBJECT => {
                let nested = scan_container(cursor, options, depth + 1)?;
                children.push_value(nested.val);
            }
            _ => return Err(ParseError::invalid_character(here)),
        }
    }

    trace!(%start, end = %cursor.position(), "leaving container");
    Ok(Spanned::new(cursor.span_from(start), children.finish()))
}
