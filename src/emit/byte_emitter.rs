//! Renders a [`Variant`] to a `Vec<u8>` accumulator of UTF-8 bytes (see
//! the module docs on [`super`]).

use crate::error::FormatError;
use crate::variant::Variant;

use super::{emit, FormatPolicy, Sink};

struct ByteSink(Vec<u8>);

impl Sink for ByteSink {
    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.0.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn push_str(&mut self, s: &str) {
        self.0.extend_from_slice(s.as_bytes());
    }
}

pub fn to_bytes(value: &Variant, policy: &FormatPolicy) -> Result<Vec<u8>, FormatError> {
    let mut sink = ByteSink(Vec::new());
    emit(&mut sink, value, policy)?;
    Ok(sink.0)
}

pub fn to_bytes_pretty(value: &Variant) -> Result<Vec<u8>, FormatError> {
    to_bytes(value, &FormatPolicy::pretty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Object;

    #[test]
    fn renders_valid_utf8() {
        let object = Object::new();
        object.set("name", "caf\u{e9}");
        let v = Variant::object(object);
        let bytes = to_bytes(&v, &FormatPolicy::one_liner()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\"name\": \"caf\u{e9}\"}");
    }

    #[test]
    fn pretty_matches_char_emitter_output() {
        let object = Object::new();
        object.set("a", 1i64);
        let v = Variant::object(object);
        let bytes = to_bytes_pretty(&v).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 1\n}");
    }
}
