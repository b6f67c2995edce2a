use tracing::*;

use crate::container::scan_container;
use crate::cursor::{is_quote, Cursor, OPEN_ARRAY, OPEN_OBJECT};
use crate::error::{ErrorKind, ParseError, Result};
use crate::options::ParseOptions;
use crate::primitive::{scan_keyword, scan_number, scan_string};
use crate::span::{Position, Span, Spanned};
use crate::value::Value;

/// Parses whole documents with a fixed set of [`ParseOptions`]. A parser holds no state between
/// calls, so one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    /// Parses a sequence of already-decoded scalars. On success the span of the result runs from
    /// the first scalar of the root value to just past its last one.
    #[instrument(
        level = "debug",
        skip_all,
        fields(len = scalars.len(), strictness = ?self.options.strictness)
    )]
    pub fn parse(&self, scalars: &[char]) -> Result<Spanned<Value>> {
        let mut cursor = Cursor::new(scalars);
        let result = self.parse_document(&mut cursor);
        match &result {
            Ok(root) => debug!(
                kind = root.val.kind_desc(),
                end = %root.span.hi,
                "parsed document"
            ),
            Err(e) => debug!(kind = ?e.kind, offset = %e.offset, "failed to parse document"),
        }
        result
    }

    pub fn parse_str(&self, input: &str) -> Result<Spanned<Value>> {
        let scalars: Vec<char> = input.chars().collect();
        self.parse(&scalars)
    }

    fn parse_document(&self, cursor: &mut Cursor<'_>) -> Result<Spanned<Value>> {
        cursor.skip_whitespace();
        let start = cursor.position();
        let Some(first) = cursor.peek() else {
            return Err(ParseError::partial_input(Position(0)));
        };

        if matches!(first, OPEN_ARRAY | OPEN_OBJECT) {
            let root = scan_container(cursor, &self.options, 1)?;
            cursor.skip_whitespace();
            if !cursor.at_end() {
                return Err(ParseError::invalid_character(cursor.position()));
            }
            return Ok(root);
        }

        if self.options.is_strict() {
            return Err(ParseError::new(ErrorKind::RootLevelMustBeAContainer, start));
        }
        self.parse_bare_literal(cursor, start)
    }

    /// Reads a non-container root. A literal must span the whole trimmed input; anything that
    /// does not scan as one is taken verbatim as a string.
    fn parse_bare_literal(
        &self,
        cursor: &mut Cursor<'_>,
        start: Position,
    ) -> Result<Spanned<Value>> {
        let mut attempt = cursor.clone();
        let scanned = match attempt.peek() {
            Some(c) if is_quote(c) => {
                scan_string(&mut attempt, self.options.decode_escapes)
                    .map(|s| s.map(Value::String))
            }
            Some('-' | '0'..='9') => scan_number(&mut attempt),
            Some('t' | 'f' | 'n') => scan_keyword(&mut attempt),
            _ => Err(ParseError::invalid_character(start)),
        };

        match scanned {
            Ok(literal) if attempt.rest_is_whitespace() => {
                *cursor = attempt;
                return Ok(literal);
            }
            Err(e) if e.kind == ErrorKind::InvalidNumberPrimitive => return Err(e),
            _ => {}
        }

        let end = cursor.trimmed_end(start);
        let text = cursor.slice(start, end);
        trace!(%start, %end, "bare root read as a plain string");
        Ok(Spanned::new(Span::new(start, end), Value::String(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(input: &str) -> Result<Value> {
        Parser::new(ParseOptions::lenient())
            .parse_str(input)
            .map(|s| s.val)
    }

    fn strict(input: &str) -> Result<Value> {
        Parser::new(ParseOptions::strict())
            .parse_str(input)
            .map(|s| s.val)
    }

    fn err(kind: ErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, Position(offset))
    }

    #[test]
    fn empty_input_is_partial() {
        assert_eq!(lenient(""), Err(err(ErrorKind::PartialInputProvided, 0)));
        assert_eq!(strict(" \n "), Err(err(ErrorKind::PartialInputProvided, 0)));
    }

    #[test]
    fn root_span_skips_surrounding_whitespace() {
        let root = Parser::default().parse_str("  [1]  ").unwrap();
        assert_eq!(root.span.into_range(), 2..5);
    }

    #[test]
    fn strict_rejects_bare_roots_at_first_scalar() {
        assert_eq!(
            strict("  123"),
            Err(err(ErrorKind::RootLevelMustBeAContainer, 2))
        );
        assert_eq!(
            strict(r#""text""#),
            Err(err(ErrorKind::RootLevelMustBeAContainer, 0))
        );
    }

    #[test]
    fn lenient_bare_literals() {
        assert_eq!(lenient("123"), Ok(Value::Integer(123)));
        assert_eq!(lenient(" 123.321 \n"), Ok(Value::Double(123.321)));
        assert_eq!(lenient("true"), Ok(Value::Boolean(true)));
        assert_eq!(lenient("null"), Ok(Value::Null));
        assert_eq!(lenient(r#""quoted""#), Ok(Value::from("quoted")));
    }

    #[test]
    fn lenient_falls_back_to_plain_string() {
        assert_eq!(
            lenient("here's a string, make of it what you will"),
            Ok(Value::from("here's a string, make of it what you will"))
        );
        assert_eq!(lenient("  true story "), Ok(Value::from("true story")));
        assert_eq!(lenient("12 monkeys"), Ok(Value::from("12 monkeys")));
        assert_eq!(lenient(r#""open"#), Ok(Value::from(r#""open"#)));
        assert_eq!(lenient(r#""\uD800""#), Ok(Value::from(r#""\uD800""#)));
    }

    #[test]
    fn lenient_reports_unconvertible_numbers() {
        assert_eq!(
            lenient("99999999999999999999"),
            Err(err(ErrorKind::InvalidNumberPrimitive, 0))
        );
    }
}
