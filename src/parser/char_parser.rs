//! The UTF-16-code-unit flavour of the lenient JSON grammar (see
//! [`super::byte_parser`] for the UTF-8 twin). Walks a [`CharView`]
//! with a reader cursor tracking line/column, consulting a string
//! cache for both object keys and String-kind payloads.

use std::rc::Rc;

use crate::cache::Interner;
use crate::container::{Array, Object};
use crate::error::{ParseError, Position};
use crate::literals;
use crate::variant::Variant;
use crate::view::CharView;

struct Reader {
    units: Rc<[u16]>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Reader {
    fn new(view: CharView) -> Self {
        Self {
            units: Rc::from(view.as_units()),
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    fn len(&self) -> usize {
        self.units.len()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.len()
    }

    /// One past the end is legal and reads as a synthetic zero unit.
    fn peek(&self) -> u16 {
        self.units.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_at(&self, offset: usize) -> u16 {
        self.units.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn advance(&mut self) -> u16 {
        let unit = self.peek();
        self.pos += 1;
        if unit == b'\n' as u16 {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        unit
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.position())
    }

    fn view_from(&self, start: usize) -> CharView {
        CharView::from_units(&self.units[start..self.pos])
    }
}

fn is_whitespace_unit(u: u16) -> bool {
    matches!(u, 0x20 | 0x09 | 0x0D | 0x0A | 0xFE | 0xFF)
}

fn is_bare_token_unit(u: u16) -> bool {
    u <= 0x7F && super::is_bare_token_unit_ascii(u as u8)
}

fn skip_whitespace_and_comments(reader: &mut Reader) {
    loop {
        while !reader.at_end() && is_whitespace_unit(reader.peek()) {
            reader.advance();
        }
        if reader.peek() == b'/' as u16 && reader.peek_at(1) == b'/' as u16 {
            while !reader.at_end() && reader.peek() != b'\n' as u16 {
                reader.advance();
            }
            continue;
        }
        if reader.peek() == b'/' as u16 && reader.peek_at(1) == b'*' as u16 {
            reader.advance();
            reader.advance();
            loop {
                if reader.at_end() {
                    break;
                }
                if reader.peek() == b'*' as u16 && reader.peek_at(1) == b'/' as u16 {
                    reader.advance();
                    reader.advance();
                    break;
                }
                reader.advance();
            }
            continue;
        }
        break;
    }
}

pub(crate) fn parse<I: Interner<CharView>>(
    view: CharView,
    cache: &I,
) -> Result<Variant, ParseError> {
    let mut reader = Reader::new(view);
    skip_whitespace_and_comments(&mut reader);
    if reader.at_end() {
        return Err(reader.error("unexpected end of input, expected a value"));
    }
    let value = parse_value(&mut reader, cache)?;
    skip_whitespace_and_comments(&mut reader);
    Ok(value)
}

fn parse_value<I: Interner<CharView>>(
    reader: &mut Reader,
    cache: &I,
) -> Result<Variant, ParseError> {
    skip_whitespace_and_comments(reader);
    if reader.at_end() {
        return Err(reader.error("unexpected end of input, expected a value"));
    }
    match reader.peek() {
        b'{' as u16 => parse_object(reader, cache),
        b'[' as u16 => parse_array(reader, cache),
        q @ (0x22 | 0x27) => {
            let s = parse_quoted_string(reader, cache, q)?;
            Ok(Variant::from(s))
        }
        _ => parse_bare_token(reader),
    }
}

fn parse_object<I: Interner<CharView>>(
    reader: &mut Reader,
    cache: &I,
) -> Result<Variant, ParseError> {
    reader.advance(); // '{'
    let object = Object::new();
    skip_whitespace_and_comments(reader);
    if reader.peek() == b'}' as u16 {
        reader.advance();
        return Ok(Variant::object(object));
    }
    loop {
        skip_whitespace_and_comments(reader);
        let key = parse_key(reader, cache)?;
        skip_whitespace_and_comments(reader);
        if reader.peek() != b':' as u16 {
            return Err(reader.error("expected ':' after object key"));
        }
        reader.advance();
        let value = parse_value(reader, cache)?;
        object.set(&key, value);
        skip_whitespace_and_comments(reader);
        match reader.peek() {
            c if c == b',' as u16 => {
                reader.advance();
                skip_whitespace_and_comments(reader);
                if reader.peek() == b'}' as u16 {
                    reader.advance();
                    break;
                }
            }
            c if c == b'}' as u16 => {
                reader.advance();
                break;
            }
            _ => return Err(reader.error("expected ',' or '}'")),
        }
    }
    Ok(Variant::object(object))
}

fn parse_array<I: Interner<CharView>>(
    reader: &mut Reader,
    cache: &I,
) -> Result<Variant, ParseError> {
    reader.advance(); // '['
    let array = Array::new();
    skip_whitespace_and_comments(reader);
    if reader.peek() == b']' as u16 {
        reader.advance();
        return Ok(Variant::array(array));
    }
    loop {
        let value = parse_value(reader, cache)?;
        array.add(value);
        skip_whitespace_and_comments(reader);
        match reader.peek() {
            c if c == b',' as u16 => {
                reader.advance();
                skip_whitespace_and_comments(reader);
                if reader.peek() == b']' as u16 {
                    reader.advance();
                    break;
                }
            }
            c if c == b']' as u16 => {
                reader.advance();
                break;
            }
            _ => return Err(reader.error("expected ',' or ']'")),
        }
    }
    Ok(Variant::array(array))
}

fn parse_key<I: Interner<CharView>>(reader: &mut Reader, cache: &I) -> Result<String, ParseError> {
    match reader.peek() {
        q @ (0x22 | 0x27) => parse_quoted_string(reader, cache, q),
        u if is_bare_token_unit(u) => {
            let start = reader.pos;
            while !reader.at_end() && is_bare_token_unit(reader.peek()) {
                reader.advance();
            }
            let raw = reader.view_from(start);
            Ok(cache.get(raw.clone(), || raw.to_owned_string()))
        }
        _ => Err(reader.error("expected an object key")),
    }
}

fn parse_quoted_string<I: Interner<CharView>>(
    reader: &mut Reader,
    cache: &I,
    quote: u16,
) -> Result<String, ParseError> {
    reader.advance(); // opening quote
    let start = reader.pos;
    let mut has_escape = false;
    loop {
        if reader.at_end() {
            return Err(reader.error("unterminated string literal"));
        }
        let u = reader.peek();
        if u == quote {
            break;
        }
        if u == b'\\' as u16 {
            has_escape = true;
            reader.advance();
            if reader.at_end() {
                return Err(reader.error("unterminated string literal"));
            }
            reader.advance();
            continue;
        }
        reader.advance();
    }
    let raw = reader.view_from(start);
    reader.advance(); // closing quote
    if !has_escape {
        return Ok(cache.get(raw, || raw.to_owned_string()));
    }
    Ok(cache.get(raw.clone(), || decode_escapes(raw)))
}

/// If `units[idx..]` starts with a `\uXXXX` escape whose code point is a
/// low surrogate (0xDC00–0xDFFF), return it so the caller can combine it
/// with a preceding high surrogate into a single astral-plane scalar.
fn peek_low_surrogate(units: &[u16], idx: usize) -> Option<u32> {
    if idx + 6 > units.len() {
        return None;
    }
    if units[idx] != b'\\' as u16 || units[idx + 1] != b'u' as u16 {
        return None;
    }
    let hex: String = units[idx + 2..idx + 6]
        .iter()
        .filter_map(|&u| char::from_u32(u as u32))
        .collect();
    if hex.len() != 4 {
        return None;
    }
    let code = u32::from_str_radix(&hex, 16).ok()?;
    (0xDC00..=0xDFFF).contains(&code).then_some(code)
}

fn decode_escapes(raw: CharView) -> String {
    let units = raw.as_units();
    let mut out = String::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let u = units[i];
        if u != b'\\' as u16 {
            if let Some(c) = char::from_u32(u as u32) {
                out.push(c);
            }
            i += 1;
            continue;
        }
        i += 1;
        if i >= units.len() {
            break;
        }
        let escaped = units[i];
        match escaped {
            _ if escaped == b'b' as u16 => {
                out.push('\u{8}');
                i += 1;
            }
            _ if escaped == b'f' as u16 => {
                out.push('\u{C}');
                i += 1;
            }
            _ if escaped == b'n' as u16 => {
                out.push('\n');
                i += 1;
            }
            _ if escaped == b'r' as u16 => {
                out.push('\r');
                i += 1;
            }
            _ if escaped == b't' as u16 => {
                out.push('\t');
                i += 1;
            }
            _ if escaped == b'"' as u16 => {
                out.push('"');
                i += 1;
            }
            _ if escaped == b'\'' as u16 => {
                out.push('\'');
                i += 1;
            }
            _ if escaped == b'/' as u16 => {
                out.push('/');
                i += 1;
            }
            _ if escaped == b'\\' as u16 => {
                out.push('\\');
                i += 1;
            }
            _ if escaped == b'u' as u16 => {
                i += 1;
                if i + 4 <= units.len() {
                    let hex: String = units[i..i + 4]
                        .iter()
                        .filter_map(|&u| char::from_u32(u as u32))
                        .collect();
                    if hex.len() == 4 {
                        if let Ok(code) = u32::from_str_radix(&hex, 16) {
                            if (0xD800..=0xDBFF).contains(&code) {
                                if let Some(low) = peek_low_surrogate(units, i + 4) {
                                    let scalar =
                                        0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                                    if let Some(c) = char::from_u32(scalar) {
                                        out.push(c);
                                    }
                                    i += 4 + 6;
                                    continue;
                                }
                            } else if let Some(c) = char::from_u32(code) {
                                out.push(c);
                            }
                            i += 4;
                            continue;
                        }
                    }
                }
                // Malformed \u escape: emit the 'u' literally, matching
                // the "any other escaped character decodes to itself" rule.
                out.push('u');
            }
            _ if escaped == b'\n' as u16 => {
                // Line continuation: the backslash-newline pair is absorbed.
                i += 1;
            }
            _ if escaped == b'\r' as u16 && units.get(i + 1).copied() == Some(b'\n' as u16) => {
                i += 2;
            }
            _ => {
                if let Some(c) = char::from_u32(escaped as u32) {
                    out.push(c);
                }
                i += 1;
            }
        }
    }
    out
}

fn parse_bare_token(reader: &mut Reader) -> Result<Variant, ParseError> {
    let start = reader.pos;
    if reader.peek() == b'-' as u16 {
        reader.advance();
    }
    while !reader.at_end() && is_bare_token_unit(reader.peek()) {
        reader.advance();
    }
    if reader.pos == start {
        return Err(reader.error("unexpected character, expected a value"));
    }
    let token = reader.view_from(start);

    if token.as_units() == literals::NULL_UNITS.as_slice() {
        return Ok(Variant::null());
    }
    if token.as_units() == literals::TRUE_UNITS.as_slice() {
        return Ok(Variant::from(true));
    }
    if token.as_units() == literals::FALSE_UNITS.as_slice() {
        return Ok(Variant::from(false));
    }
    if token.as_units() == literals::NAN_UNITS.as_slice() {
        return Ok(Variant::from(f64::NAN));
    }
    if token.as_units() == literals::INFINITY_UNITS.as_slice() {
        return Ok(Variant::from(f64::INFINITY));
    }
    if token.as_units() == literals::NEG_INFINITY_UNITS.as_slice() {
        return Ok(Variant::from(f64::NEG_INFINITY));
    }

    let as_int = token.parse_i64();
    if as_int.consumed == token.len() {
        return Ok(Variant::from(as_int.value));
    }
    let as_float = token.parse_f64();
    if as_float.consumed > 0 {
        return Ok(Variant::from(as_float.value));
    }
    Err(ParseError::new(
        format!("unrecognised token '{}'", token.to_owned_string()),
        reader.position(),
    ))
}
