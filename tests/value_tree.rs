//! End-to-end coverage of the value tree against its documented
//! invariants: parse/emit round-tripping, the coercion and sharing
//! rules, and the depth guard.

use dyson::container::{Array, Object};
use dyson::emit::char_emitter::{to_string, to_string_pretty};
use dyson::emit::policy::{FormatPolicy, SpecialFloatPolicy};
use dyson::parser::{parse_bytes, parse_str};
use dyson::variant::Variant;

#[test]
fn leniency_accepts_comments_unquoted_keys_and_trailing_separators() {
    let v = parse_str("{/*c*/ a: 1, b: [1,2,], c:'x', }").unwrap();
    assert_eq!(v.get("a").as_long(), 1);
    assert_eq!(v.get("b").as_array().count(), 2);
    assert_eq!(v.get("c").as_string(), "x");
}

#[test]
fn escapes_and_line_continuation_decode() {
    let v = parse_str("\"a\\nb\\\nc\\u0041\"").unwrap();
    assert_eq!(v.as_string(), "a\nbcA");
}

#[test]
fn special_floats_round_trip_through_every_policy() {
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

    let parsed = parse_str("NaN").unwrap();
    assert!(parsed.as_double().is_nan());
}

#[test]
fn auto_coercion_builds_a_mixed_array_then_object() {
    let v = Variant::null();
    v.add(1i64);
    v.add("x");
    assert!(v.is_array());
    assert_eq!(v.get(0).as_long(), 1);
    assert_eq!(v.get(1).as_string(), "x");

    v.set("k", true);
    assert!(v.is_object());
    let rendered = to_string(&v, &FormatPolicy::one_liner()).unwrap();
    assert_eq!(rendered, "{\"0\": 1, \"1\": \"x\", \"k\": true}");
}

#[test]
fn sharing_an_object_handle_observes_mutation_through_both_aliases() {
    let o = Object::new();
    o.set("a", 1i64);
    let p = o.clone();
    p.set("a", 2i64);
    assert_eq!(o.get("a").as_long(), 2);
}

#[test]
fn pretty_print_matches_the_documented_layout() {
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
fn pick_follows_a_dotted_path_and_stops_at_the_first_miss() {
    let v = parse_str(r#"{"1":{"1":{"1":"hit"}}}"#).unwrap();
    assert_eq!(v.pick("1.1.1").as_string(), "hit");
    assert!(v.pick("1.2.1").is_null());
}

#[test]
fn depth_guard_rejects_a_pathologically_nested_array() {
    let mut policy = FormatPolicy::one_liner();
    policy.max_depth = 8;
    let root = Array::new();
    let mut current = root.clone();
    for _ in 0..(policy.max_depth + 4) {
        let child = Array::new();
        current.add(child.clone());
        current = child;
    }
    let v = Variant::array(root);
    assert!(to_string(&v, &policy).is_err());
}

#[test]
fn round_trip_through_the_byte_and_char_parsers_agree() {
    let text = r#"{"a": 1, "b": [1, 2, 3], "c": "hi", "d": null, "e": true}"#;
    let from_str = parse_str(text).unwrap();
    let from_bytes = parse_bytes(text.as_bytes()).unwrap();
    assert!(from_str.equivalent(&from_bytes, 64).unwrap());
}

#[test]
fn emit_then_reparse_is_equivalent_to_the_original() {
    let v = parse_str(r#"{"a": 1, "b": [1, 2.5, "x", null, false]}"#).unwrap();
    let rendered = to_string(&v, &FormatPolicy::one_liner()).unwrap();
    let reparsed = parse_str(&rendered).unwrap();
    assert!(v.equivalent(&reparsed, 64).unwrap());
}

#[test]
fn duplicate_is_equivalent_but_not_equal_for_composites() {
    let array = Array::new();
    array.add(1i64);
    array.add("x");
    let v = Variant::array(array);
    let d = v.duplicate();
    assert!(!v.equals(&d));
    assert!(v.equivalent(&d, 64).unwrap());
}

#[test]
fn object_get_on_absent_key_does_not_mutate_but_indexed_access_does() {
    let o = Object::new();
    assert!(!o.contains_key("missing"));
    assert!(o.get("missing").is_null());
    assert!(!o.contains_key("missing"));

    let v = Variant::object(o.clone());
    let _ = v.index("missing");
    assert!(o.contains_key("missing"));
}

#[test]
fn array_get_out_of_range_does_not_mutate_but_indexed_access_extends() {
    let a = Array::new();
    assert!(a.get(3).is_null());
    assert_eq!(a.count(), 0);

    let v = Variant::array(a.clone());
    let _ = v.index(3);
    assert_eq!(a.count(), 4);
}
