//! Scanners for the leaf values: string literals, numbers, the `true`/`false`/`null` keywords and
//! unquoted object keys. Each one is entered with the cursor on the token's first scalar and
//! leaves the cursor on the first scalar after the token.

use crate::cursor::{is_terminator, Cursor};
use crate::error::{ErrorKind, ParseError, Result};
use crate::span::{Position, Spanned};
use crate::value::Value;

/// Scans a string literal opened by `"` or `'`. Only the quote that opened the literal closes
/// it. The returned span covers both quotes.
pub(crate) fn scan_string(
    cursor: &mut Cursor<'_>,
    decode_escapes: bool,
) -> Result<Spanned<String>> {
    let start = cursor.position();
    let Some(quote) = cursor.advance() else {
        return Err(ParseError::partial_input(start));
    };
    let content_start = cursor.position();
    // Only allocated once an escape shows up; plain literals are sliced in one go.
    let mut decoded: Option<String> = None;

    loop {
        let here = cursor.position();
        match cursor.advance() {
            None => return Err(ParseError::partial_input(start)),
            Some(scalar) if scalar == quote => {
                let content = match decoded {
                    Some(content) => content,
                    None => cursor.slice(content_start, here),
                };
                return Ok(Spanned::new(cursor.span_from(start), content));
            }
            Some('\\') if decode_escapes => {
                let buf = decoded.get_or_insert_with(|| cursor.slice(content_start, here));
                let scalar = scan_escape(cursor, start, here)?;
                buf.push(scalar);
            }
            Some(scalar) => {
                if let Some(buf) = decoded.as_mut() {
                    buf.push(scalar);
                }
            }
        }
    }
}

/// Decodes one escape sequence. The cursor sits just past the backslash at `backslash`.
fn scan_escape(
    cursor: &mut Cursor<'_>,
    literal_start: Position,
    backslash: Position,
) -> Result<char> {
    let Some(lead) = cursor.advance() else {
        return Err(ParseError::partial_input(literal_start));
    };
    let scalar = match lead {
        '"' => '"',
        '\'' => '\'',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return scan_unicode_escape(cursor, literal_start, backslash),
        _ => return Err(ParseError::invalid_character(backslash)),
    };
    Ok(scalar)
}

/// `\uXXXX`, combining a UTF-16 surrogate pair when the first unit is a high surrogate.
fn scan_unicode_escape(
    cursor: &mut Cursor<'_>,
    literal_start: Position,
    backslash: Position,
) -> Result<char> {
    let high = scan_hex_unit(cursor, literal_start)?;
    let code = match high {
        0xD800..=0xDBFF => {
            // Peek first so a closing quote right after the high half is left in place.
            match cursor.peek() {
                Some('\\') => {}
                Some(_) => return Err(ParseError::invalid_character(backslash)),
                None => return Err(ParseError::partial_input(literal_start)),
            }
            cursor.advance();
            match cursor.advance() {
                Some('u') => {}
                Some(_) => return Err(ParseError::invalid_character(backslash)),
                None => return Err(ParseError::partial_input(literal_start)),
            }
            let low = scan_hex_unit(cursor, literal_start)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ParseError::invalid_character(backslash));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        }
        0xDC00..=0xDFFF => return Err(ParseError::invalid_character(backslash)),
        unit => unit,
    };
    char::from_u32(code).ok_or(ParseError::invalid_character(backslash))
}

fn scan_hex_unit(cursor: &mut Cursor<'_>, literal_start: Position) -> Result<u32> {
    let mut unit = 0;
    for _ in 0..4 {
        let here = cursor.position();
        let Some(scalar) = cursor.advance() else {
            return Err(ParseError::partial_input(literal_start));
        };
        let Some(digit) = scalar.to_digit(16) else {
            return Err(ParseError::invalid_character(here));
        };
        unit = unit * 16 + digit;
    }
    Ok(unit)
}

/// Scans a number entered at a digit or `-`. The terminating scalar (`,`, `}`, `]`,
/// whitespace) is left for the caller; running into the end of input also ends the number.
pub(crate) fn scan_number(cursor: &mut Cursor<'_>) -> Result<Spanned<Value>> {
    let start = cursor.position();
    let mut seen_point = false;
    let mut seen_exponent = false;
    let mut seen_digit = false;
    // Position right after the exponent marker, where one sign is allowed.
    let mut sign_allowed_at = Some(start);

    while let Some(scalar) = cursor.peek() {
        let here = cursor.position();
        match scalar {
            '0'..='9' => seen_digit = true,
            '-' | '+' if sign_allowed_at == Some(here) && (scalar == '-' || seen_exponent) => {}
            '.' if !seen_point && !seen_exponent => seen_point = true,
            'e' | 'E' if !seen_exponent && seen_digit => {
                seen_exponent = true;
                sign_allowed_at = Some(Position(here.0 + 1));
            }
            c if is_terminator(c) => break,
            _ => return Err(ParseError::invalid_character(here)),
        }
        cursor.advance();
    }

    let span = cursor.span_from(start);
    let text = cursor.slice(span.lo, span.hi);
    let invalid = || ParseError::new(ErrorKind::InvalidNumberPrimitive, start);
    let value = if seen_point || seen_exponent {
        let n: f64 = text.parse().map_err(|_| invalid())?;
        if !n.is_finite() {
            return Err(invalid());
        }
        Value::Double(n)
    } else {
        Value::Integer(text.parse().map_err(|_| invalid())?)
    };
    Ok(Spanned::new(span, value))
}

/// Scans `true`, `false` or `null`, chosen by the first scalar.
pub(crate) fn scan_keyword(cursor: &mut Cursor<'_>) -> Result<Spanned<Value>> {
    let start = cursor.position();
    let (keyword, value) = match cursor.peek() {
        Some('t') => ("true", Value::Boolean(true)),
        Some('f') => ("false", Value::Boolean(false)),
        Some('n') => ("null", Value::Null),
        Some(_) => return Err(ParseError::invalid_character(start)),
        None => return Err(ParseError::partial_input(start)),
    };

    for expected in keyword.chars() {
        let here = cursor.position();
        match cursor.advance() {
            Some(scalar) if scalar == expected => {}
            Some(_) => return Err(ParseError::invalid_character(here)),
            None => return Err(ParseError::partial_input(start)),
        }
    }
    if let Some(scalar) = cursor.peek() {
        if !is_terminator(scalar) {
            return Err(ParseError::invalid_character(cursor.position()));
        }
    }
    Ok(Spanned::new(cursor.span_from(start), value))
}

pub(crate) fn is_bare_key_start(scalar: char) -> bool {
    scalar.is_alphabetic() || matches!(scalar, '_' | '$')
}

fn is_bare_key_continue(scalar: char) -> bool {
    scalar.is_alphanumeric() || matches!(scalar, '_' | '$')
}

/// Scans an unquoted object key such as `anInteger` in `{anInteger: 1}`.
pub(crate) fn scan_bare_key(cursor: &mut Cursor<'_>) -> Result<Spanned<String>> {
    let start = cursor.position();
    match cursor.peek() {
        Some(scalar) if is_bare_key_start(scalar) => {}
        Some(_) => return Err(ParseError::invalid_character(start)),
        None => return Err(ParseError::partial_input(start)),
    }
    while cursor.peek().is_some_and(is_bare_key_continue) {
        cursor.advance();
    }
    let span = cursor.span_from(start);
    Ok(Spanned::new(span, cursor.slice(span.lo, span.hi)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn scalars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn string(input: &str) -> Result<Spanned<String>> {
        let input = scalars(input);
        scan_string(&mut Cursor::new(&input), true)
    }

    fn number(input: &str) -> Result<Value> {
        let input = scalars(input);
        scan_number(&mut Cursor::new(&input)).map(|s| s.val)
    }

    fn keyword(input: &str) -> Result<Value> {
        let input = scalars(input);
        scan_keyword(&mut Cursor::new(&input)).map(|s| s.val)
    }

    fn err(kind: ErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, Position(offset))
    }

    fn invalid(offset: usize) -> ParseError {
        err(ErrorKind::InvalidCharacter, offset)
    }

    fn partial(offset: usize) -> ParseError {
        err(ErrorKind::PartialInputProvided, offset)
    }

    #[test]
    fn empty_string_bounds_a_zero_length_slice() {
        let input = scalars(r#""""#);
        let mut cursor = Cursor::new(&input);
        let scanned = scan_string(&mut cursor, true).unwrap();
        assert_eq!(scanned.val, "");
        assert_eq!(scanned.span, Span::new(Position(0), Position(2)));
        let (lo, hi) = (scanned.span.lo.offset(), scanned.span.hi.offset());
        let content = Span::new(Position(lo + 1), Position(hi - 1));
        assert!(content.is_empty());
        assert!(cursor.at_end());
    }

    #[test]
    fn string_closes_only_on_its_own_quote() {
        assert_eq!(string(r#"'say "hi"' tail"#).unwrap().val, r#"say "hi""#);
        assert_eq!(string(r#""it's""#).unwrap().val, "it's");
    }

    #[test]
    fn unterminated_string_points_at_opening_quote() {
        assert_eq!(string(r#""abc'"#), Err(partial(0)));
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(
            string(r#""a\"b\\c\/d\n\té😀""#).unwrap().val,
            "a\"b\\c/d\n\té😀"
        );
        assert_eq!(string(r#"'\''"#).unwrap().val, "'");
    }

    #[test]
    fn escapes_pass_through_verbatim_when_disabled() {
        let input = scalars(r#""a\nb\""#);
        let scanned = scan_string(&mut Cursor::new(&input), false).unwrap();
        assert_eq!(scanned.val, r"a\nb\");
    }

    #[test]
    fn bad_escapes() {
        assert_eq!(string(r#""ab\q""#), Err(invalid(3)));
        assert_eq!(string(r#""\u12g4""#), Err(invalid(5)));
        assert_eq!(string(r#""x\uDC00""#), Err(invalid(2)));
        assert_eq!(string(r#""\uD800\n""#), Err(invalid(1)));
        assert_eq!(string(r#""\uD800\"#), Err(partial(0)));
        assert_eq!(string(r#""\u00"#), Err(partial(0)));
        assert_eq!(string(r#""\"#), Err(partial(0)));
    }

    #[test]
    fn unpaired_high_surrogate_before_closing_quote() {
        let input = scalars(r#""\uD800""#);
        let mut cursor = Cursor::new(&input);
        assert_eq!(scan_string(&mut cursor, true), Err(invalid(1)));
        assert_eq!(cursor.peek(), Some('"'));
        assert_eq!(string(r#""\uD800" "#), Err(invalid(1)));
    }

    #[test]
    fn integers_and_doubles() {
        assert_eq!(number("123,"), Ok(Value::Integer(123)));
        assert_eq!(number("-1]"), Ok(Value::Integer(-1)));
        assert_eq!(number("0.55}"), Ok(Value::Double(0.55)));
        assert_eq!(number("-123.456"), Ok(Value::Double(-123.456)));
        assert_eq!(number("1e3 "), Ok(Value::Double(1000.0)));
        assert_eq!(number("2.5E-2"), Ok(Value::Double(0.025)));
        assert_eq!(number("7e+1"), Ok(Value::Double(70.0)));
    }

    #[test]
    fn number_stops_before_terminator() {
        let input = scalars("42,7");
        let mut cursor = Cursor::new(&input);
        let scanned = scan_number(&mut cursor).unwrap();
        assert_eq!(scanned.span, Span::new(Position(0), Position(2)));
        assert_eq!(cursor.peek(), Some(','));
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(number("1-2"), Err(invalid(1)));
        assert_eq!(number("--1"), Err(invalid(1)));
        assert_eq!(number("1.2.3"), Err(invalid(3)));
        assert_eq!(number("1e2.0"), Err(invalid(3)));
        assert_eq!(number("12a"), Err(invalid(2)));
        assert_eq!(number("+1"), Err(invalid(0)));
    }

    #[test]
    fn numbers_that_do_not_convert() {
        assert_eq!(
            number("9223372036854775808"),
            Err(err(ErrorKind::InvalidNumberPrimitive, 0))
        );
        assert_eq!(number("-,"), Err(err(ErrorKind::InvalidNumberPrimitive, 0)));
        assert_eq!(number("1e"), Err(err(ErrorKind::InvalidNumberPrimitive, 0)));
        assert_eq!(
            number("1e999"),
            Err(err(ErrorKind::InvalidNumberPrimitive, 0))
        );
        assert_eq!(number("-9223372036854775808"), Ok(Value::Integer(i64::MIN)));
    }

    #[test]
    fn keywords() {
        assert_eq!(keyword("true"), Ok(Value::Boolean(true)));
        assert_eq!(keyword("false]"), Ok(Value::Boolean(false)));
        assert_eq!(keyword("null,"), Ok(Value::Null));
        assert_eq!(keyword("nul"), Err(partial(0)));
        assert_eq!(keyword("True"), Err(invalid(0)));
        assert_eq!(keyword("fals3"), Err(invalid(4)));
        assert_eq!(keyword("nullx"), Err(invalid(4)));
    }

    #[test]
    fn bare_keys() {
        let input = scalars("anInteger:123");
        let mut cursor = Cursor::new(&input);
        let key = scan_bare_key(&mut cursor).unwrap();
        assert_eq!(key.val, "anInteger");
        assert_eq!(cursor.peek(), Some(':'));
    }
}
