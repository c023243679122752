//! # Emitter
//!
//! Walks a [`Variant`] tree and renders it as JSON text, parameterised
//! by a [`policy::FormatPolicy`]. Two concrete sinks exist —
//! [`char_emitter`] (a UTF-16 accumulator materialised as a `String`)
//! and [`byte_emitter`] (a UTF-8 byte accumulator) — sharing the
//! recursive-walk logic in this module via the private [`Sink`] trait,
//! since (unlike the parser) the emitter's hot loop is string
//! formatting, not alphabet-specific tokenising, so genericity here
//! costs nothing on the hot path.

pub mod byte_emitter;
pub mod char_emitter;
pub mod policy;

pub use policy::{FormatPolicy, SpecialFloatPolicy, WhitespacePolicy};

use std::fmt;

use crate::error::FormatError;
use crate::variant::{Kind, Variant};

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char_emitter::to_string(self, &FormatPolicy::one_liner()) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("null"),
        }
    }
}

/// An append-only output accumulator. `char_emitter` backs this with a
/// `String` (pushing code points directly); `byte_emitter` backs it
/// with a `Vec<u8>` (pushing each code point's UTF-8 encoding).
pub(crate) trait Sink {
    fn push_char(&mut self, c: char);
    fn push_str(&mut self, s: &str);
}

pub(crate) fn emit<S: Sink>(
    sink: &mut S,
    value: &Variant,
    policy: &FormatPolicy,
) -> Result<(), FormatError> {
    write_value(sink, value, policy, 0)
}

fn write_indent<S: Sink>(sink: &mut S, policy: &FormatPolicy, depth: usize) {
    sink.push_char('\n');
    for _ in 0..depth {
        sink.push_str(&policy.indent);
    }
}

fn write_value<S: Sink>(
    sink: &mut S,
    value: &Variant,
    policy: &FormatPolicy,
    depth: usize,
) -> Result<(), FormatError> {
    if depth > policy.max_depth {
        tracing::warn!(max_depth = policy.max_depth, "emitter exceeded maximum depth");
        return Err(FormatError::MaxDepthExceeded {
            max_depth: policy.max_depth,
        });
    }
    match value.kind() {
        Kind::Null => {
            sink.push_str("null");
            Ok(())
        }
        Kind::Boolean => {
            sink.push_str(if value.as_bool() { "true" } else { "false" });
            Ok(())
        }
        Kind::Integer => {
            sink.push_str(&value.as_long().to_string());
            Ok(())
        }
        Kind::Float => write_float(sink, value.as_double(), policy),
        Kind::String => {
            write_escaped_string(sink, &value.as_string(), policy);
            Ok(())
        }
        Kind::Array => write_array(sink, value, policy, depth),
        Kind::Object => write_object(sink, value, policy, depth),
    }
}

fn write_float<S: Sink>(sink: &mut S, v: f64, policy: &FormatPolicy) -> Result<(), FormatError> {
    if v.is_finite() {
        sink.push_str(&format_finite_float(v));
        return Ok(());
    }
    match policy.special_float {
        SpecialFloatPolicy::Throw => Err(FormatError::NonFiniteFloat(v)),
        SpecialFloatPolicy::AsString => {
            sink.push_char('"');
            sink.push_str(&special_float_token(v));
            sink.push_char('"');
            Ok(())
        }
        SpecialFloatPolicy::AsJsLiteral => {
            sink.push_str(&special_float_token(v));
            Ok(())
        }
    }
}

fn special_float_token(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

fn format_finite_float(v: f64) -> String {
    // The platform default decimal form; no round-trip guarantee beyond
    // what Rust's own `f64::to_string` provides (see Non-goals).
    let s = v.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}

fn write_escaped_string<S: Sink>(sink: &mut S, s: &str, policy: &FormatPolicy) {
    sink.push_char('"');
    for c in s.chars() {
        match c {
            '\u{8}' => sink.push_str("\\b"),
            '\t' => sink.push_str("\\t"),
            '\n' => sink.push_str("\\n"),
            '\u{C}' => sink.push_str("\\f"),
            '\r' => sink.push_str("\\r"),
            '\\' => sink.push_str("\\\\"),
            '"' => sink.push_str("\\\""),
            c if policy.escape_unicode && ((c as u32) < 0x20 || (c as u32) >= 0x7F) => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    sink.push_str(&format!("\\u{:04x}", unit));
                }
            }
            c => sink.push_char(c),
        }
    }
    sink.push_char('"');
}

fn write_array<S: Sink>(
    sink: &mut S,
    value: &Variant,
    policy: &FormatPolicy,
    depth: usize,
) -> Result<(), FormatError> {
    let array = value.as_array();
    if array.is_empty() && collapses_when_empty(policy) {
        sink.push_str("[]");
        return Ok(());
    }
    let inline = stays_inline(policy, depth, array.is_simple());
    sink.push_char('[');
    let items = array.to_vec();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write_separator(sink, policy, depth + 1, inline);
        } else if !inline {
            write_indent(sink, policy, depth + 1);
        }
        write_value(sink, item, policy, depth + 1)?;
    }
    if !inline {
        write_indent(sink, policy, depth);
    }
    sink.push_char(']');
    Ok(())
}

fn write_object<S: Sink>(
    sink: &mut S,
    value: &Variant,
    policy: &FormatPolicy,
    depth: usize,
) -> Result<(), FormatError> {
    let object = value.as_object();
    if object.is_empty() && collapses_when_empty(policy) {
        sink.push_str("{}");
        return Ok(());
    }
    let inline = stays_inline(policy, depth, object.is_simple());
    sink.push_char('{');
    let keys = object.keys();
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            write_separator(sink, policy, depth + 1, inline);
        } else if !inline {
            write_indent(sink, policy, depth + 1);
        }
        write_escaped_string(sink, key, policy);
        sink.push_str(": ");
        write_value(sink, &object.get(key), policy, depth + 1)?;
    }
    if !inline {
        write_indent(sink, policy, depth);
    }
    sink.push_char('}');
    Ok(())
}

/// `ExceptEmpty` and `Simple` collapse an empty container to `[]`/`{}`
/// inline; `Never` produces the same bytes either way since it never
/// newlines. Only `Every` must fall through to the expanding path, so
/// its empty containers still open, newline, and close on a fresh line.
fn collapses_when_empty(policy: &FormatPolicy) -> bool {
    !matches!(policy.whitespace, WhitespacePolicy::Every)
}

fn stays_inline(policy: &FormatPolicy, _depth: usize, is_simple: bool) -> bool {
    match policy.whitespace {
        WhitespacePolicy::Never => true,
        WhitespacePolicy::Every | WhitespacePolicy::ExceptEmpty => false,
        WhitespacePolicy::Simple => is_simple,
    }
}

fn write_separator<S: Sink>(sink: &mut S, policy: &FormatPolicy, depth: usize, inline: bool) {
    sink.push_char(',');
    if inline {
        sink.push_char(' ');
    } else {
        write_indent(sink, policy, depth);
    }
}
