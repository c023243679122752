//! Renders a [`Variant`] to a `String` accumulator (the UTF-16-oriented
//! sink; see the module docs on [`super`]).

use crate::error::FormatError;
use crate::variant::Variant;

use super::{emit, FormatPolicy, Sink};

struct StringSink(String);

impl Sink for StringSink {
    fn push_char(&mut self, c: char) {
        self.0.push(c);
    }

    fn push_str(&mut self, s: &str) {
        self.0.push_str(s);
    }
}

pub fn to_string(value: &Variant, policy: &FormatPolicy) -> Result<String, FormatError> {
    let mut sink = StringSink(String::new());
    emit(&mut sink, value, policy)?;
    Ok(sink.0)
}

pub fn to_string_pretty(value: &Variant) -> Result<String, FormatError> {
    to_string(value, &FormatPolicy::pretty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Array, Object};
    use crate::emit::{SpecialFloatPolicy, WhitespacePolicy};

    #[test]
    fn pretty_print_scenario() {
        let object = Object::new();
        object.set("a", 1i64);
        let array = Array::new();
        array.add(1i64);
        array.add(2i64);
        object.set("b", array);
        let v = Variant::object(object);
        let expected = "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}";
        assert_eq!(to_string_pretty(&v).unwrap(), expected);
    }

    #[test]
    fn one_liner_has_no_newlines() {
        let object = Object::new();
        object.set("a", 1i64);
        let v = Variant::object(object);
        assert_eq!(to_string(&v, &FormatPolicy::one_liner()).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn special_float_policies() {
        let v = Variant::from(f64::NAN);
        let mut as_string = FormatPolicy::one_liner();
        as_string.special_float = SpecialFloatPolicy::AsString;
        assert_eq!(to_string(&v, &as_string).unwrap(), "\"NaN\"");

        let mut as_literal = FormatPolicy::one_liner();
        as_literal.special_float = SpecialFloatPolicy::AsJsLiteral;
        assert_eq!(to_string(&v, &as_literal).unwrap(), "NaN");

        let mut throws = FormatPolicy::one_liner();
        throws.special_float = SpecialFloatPolicy::Throw;
        assert!(to_string(&v, &throws).is_err());
    }

    #[test]
    fn depth_guard_on_nested_arrays() {
        let mut policy = FormatPolicy::one_liner();
        policy.max_depth = 3;
        let root = Array::new();
        let mut current = root.clone();
        for _ in 0..(policy.max_depth + 2) {
            let child = Array::new();
            current.add(child.clone());
            current = child;
        }
        let v = Variant::array(root);
        assert!(to_string(&v, &policy).is_err());
    }

    #[test]
    fn simple_containers_stay_inline_under_mixed_policy() {
        let mut policy = FormatPolicy::mixed();
        policy.whitespace = WhitespacePolicy::Simple;
        let array = Array::new();
        array.add(1i64);
        array.add(2i64);
        let v = Variant::array(array);
        assert_eq!(to_string(&v, &policy).unwrap(), "[1, 2]");
    }

    #[test]
    fn every_policy_expands_empty_containers_unlike_except_empty() {
        let mut policy = FormatPolicy::pretty();
        policy.whitespace = WhitespacePolicy::Every;

        let empty_array = Variant::array(Array::new());
        assert_eq!(to_string(&empty_array, &policy).unwrap(), "[\n]");

        let empty_object = Variant::object(Object::new());
        assert_eq!(to_string(&empty_object, &policy).unwrap(), "{\n}");

        // ExceptEmpty collapses the same containers inline.
        let except_empty = FormatPolicy::pretty();
        assert_eq!(to_string(&empty_array, &except_empty).unwrap(), "[]");
        assert_eq!(to_string(&empty_object, &except_empty).unwrap(), "{}");
    }

    #[test]
    fn every_policy_always_expands_non_empty_containers() {
        let mut policy = FormatPolicy::pretty();
        policy.whitespace = WhitespacePolicy::Every;
        let array = Array::new();
        array.add(1i64);
        let v = Variant::array(array);
        assert_eq!(to_string(&v, &policy).unwrap(), "[\n  1\n]");
    }

    #[test]
    fn unicode_escape_policy_escapes_high_code_units() {
        let mut policy = FormatPolicy::one_liner();
        policy.escape_unicode = true;
        let v = Variant::from("caf\u{e9}");
        assert_eq!(to_string(&v, &policy).unwrap(), "\"caf\\u00e9\"");
    }
}
