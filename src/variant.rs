//! # Variant: the Dynamic Value Node
//!
//! [`Variant`] is the reference-typed dynamic value at the heart of
//! this crate: a node holding exactly one of seven [`Kind`]s, mutable
//! in place, with auto-coercing accessors and structural mutators.
//!
//! ## Design
//! Unlike the reference runtime's `Value` enum — which is cloned by
//! value and only reaches for `Rc<RefCell<_>>` around its *composite*
//! payloads (`List`, `Dict`) — `Variant` itself wraps its whole state
//! in `Rc<RefCell<VariantState>>`. That extra indirection is load
//! bearing: `Object::set` must be able to mutate an *existing* slot's
//! Variant in place (preserving its identity for any handle a caller
//! already holds) even when the new value is a different kind
//! entirely (e.g. replacing a String with an Object). A bare `enum`
//! clone, as the reference runtime uses for `Value`, cannot do that —
//! only an interior-mutable handle can.
//!
//! `Clone` on `Variant` aliases the node (two clones are the same
//! reference, exactly as "reference-typed" implies); [`Variant::duplicate`]
//! is the only way to obtain an independent deep copy, mirroring
//! `Array`/`Object`'s own handle-vs-duplicate split.

use std::cell::RefCell;
use std::rc::Rc;

use crate::container::{Array, Object};
use crate::error::FormatError;

/// The discriminator among the seven kinds a Variant can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

#[derive(Clone)]
pub(crate) enum VariantState {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl VariantState {
    fn kind(&self) -> Kind {
        match self {
            VariantState::Null => Kind::Null,
            VariantState::Boolean(_) => Kind::Boolean,
            VariantState::Integer(_) => Kind::Integer,
            VariantState::Float(_) => Kind::Float,
            VariantState::String(_) => Kind::String,
            VariantState::Array(_) => Kind::Array,
            VariantState::Object(_) => Kind::Object,
        }
    }
}

/// A key used to address into a Variant: either an integer index (Array
/// semantics) or a string key (Object semantics). Dispatch between the
/// two, including the cross-kind fallbacks, is described on
/// [`Variant::get`] and [`Variant::index`].
pub enum Selector {
    Index(usize),
    Key(String),
}

impl From<usize> for Selector {
    fn from(v: usize) -> Self {
        Selector::Index(v)
    }
}

impl From<i32> for Selector {
    fn from(v: i32) -> Self {
        Selector::Index(v.max(0) as usize)
    }
}

impl From<i64> for Selector {
    fn from(v: i64) -> Self {
        Selector::Index(v.max(0) as usize)
    }
}

impl From<&str> for Selector {
    fn from(v: &str) -> Self {
        Selector::Key(v.to_string())
    }
}

impl From<String> for Selector {
    fn from(v: String) -> Self {
        Selector::Key(v)
    }
}

enum Resolved {
    Arr(Array, usize),
    Obj(Object, String),
}

/// The dynamic value node. See the module docs for why this wraps
/// `Rc<RefCell<_>>` around its whole state rather than only its
/// composite payloads.
#[derive(Clone)]
pub struct Variant(Rc<RefCell<VariantState>>);

impl Variant {
    fn with_state(state: VariantState) -> Self {
        Self(Rc::new(RefCell::new(state)))
    }

    pub fn null() -> Self {
        Self::with_state(VariantState::Null)
    }

    pub fn array(array: Array) -> Self {
        Self::with_state(VariantState::Array(array))
    }

    pub fn object(object: Object) -> Self {
        Self::with_state(VariantState::Object(object))
    }

    pub fn kind(&self) -> Kind {
        self.0.borrow().kind()
    }

    pub fn is_null(&self) -> bool {
        self.kind() == Kind::Null
    }

    pub fn is_boolean(&self) -> bool {
        self.kind() == Kind::Boolean
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind(), Kind::Integer | Kind::Float)
    }

    pub fn is_string(&self) -> bool {
        self.kind() == Kind::String
    }

    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    pub fn is_object(&self) -> bool {
        self.kind() == Kind::Object
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind(), Kind::Array | Kind::Object)
    }

    /// True iff Null, Boolean false, numeric zero, empty string, or a
    /// zero-length container.
    pub fn is_empty(&self) -> bool {
        match &*self.0.borrow() {
            VariantState::Null => true,
            VariantState::Boolean(b) => !b,
            VariantState::Integer(i) => *i == 0,
            VariantState::Float(f) => *f == 0.0,
            VariantState::String(s) => s.is_empty(),
            VariantState::Array(a) => a.is_empty(),
            VariantState::Object(o) => o.is_empty(),
        }
    }

    // ---- Coercing accessors (never fail; see the coercion table) ----

    pub fn as_bool(&self) -> bool {
        match &*self.0.borrow() {
            VariantState::Null => false,
            VariantState::Boolean(b) => *b,
            VariantState::Integer(i) => *i != 0,
            VariantState::Float(f) => *f != 0.0,
            VariantState::String(s) => {
                parse_leading_i64(s).map(|v| v != 0).unwrap_or(false)
                    || s.eq_ignore_ascii_case("true")
            }
            VariantState::Array(a) => !a.is_empty(),
            VariantState::Object(o) => !o.is_empty(),
        }
    }

    pub fn as_long(&self) -> i64 {
        match &*self.0.borrow() {
            VariantState::Null => 0,
            VariantState::Boolean(b) => *b as i64,
            VariantState::Integer(i) => *i,
            VariantState::Float(f) => *f as i64,
            VariantState::String(s) => parse_leading_i64(s).unwrap_or(0),
            VariantState::Array(a) => a.count() as i64,
            VariantState::Object(o) => o.count() as i64,
        }
    }

    pub fn as_int(&self) -> i32 {
        self.as_long().clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    pub fn as_double(&self) -> f64 {
        match &*self.0.borrow() {
            VariantState::Null => 0.0,
            VariantState::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            VariantState::Integer(i) => *i as f64,
            VariantState::Float(f) => *f,
            VariantState::String(s) => parse_leading_f64(s).unwrap_or(0.0),
            VariantState::Array(a) => a.count() as f64,
            VariantState::Object(o) => o.count() as f64,
        }
    }

    pub fn as_string(&self) -> String {
        match &*self.0.borrow() {
            VariantState::Null => String::new(),
            VariantState::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            VariantState::Integer(i) => i.to_string(),
            VariantState::Float(f) => f.to_string(),
            VariantState::String(s) => s.clone(),
            VariantState::Array(_) => "[ ... ]".to_string(),
            VariantState::Object(_) => "{ ... }".to_string(),
        }
    }

    pub fn as_array(&self) -> Array {
        match &*self.0.borrow() {
            VariantState::Null => Array::new(),
            VariantState::Array(a) => a.clone(),
            VariantState::Object(o) => o
                .try_convert_to_array()
                .unwrap_or_else(|| Array::from_variants(vec![Variant::object(o.clone())])),
            other => Array::from_variants(vec![Variant::with_state(other.clone())]),
        }
    }

    // ---- Non-coercing accessors (the indexer's `get`-style twin for
    // scalars: `None` on a kind mismatch rather than a best-effort
    // coercion) ----

    pub fn try_as_bool(&self) -> Option<bool> {
        match &*self.0.borrow() {
            VariantState::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn try_as_long(&self) -> Option<i64> {
        match &*self.0.borrow() {
            VariantState::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn try_as_double(&self) -> Option<f64> {
        match &*self.0.borrow() {
            VariantState::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn try_as_string(&self) -> Option<String> {
        match &*self.0.borrow() {
            VariantState::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn try_as_array(&self) -> Option<Array> {
        match &*self.0.borrow() {
            VariantState::Array(a) => Some(a.clone()),
            _ => None,
        }
    }

    pub fn try_as_object(&self) -> Option<Object> {
        match &*self.0.borrow() {
            VariantState::Object(o) => Some(o.clone()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Object {
        match &*self.0.borrow() {
            VariantState::Null => Object::new(),
            VariantState::Object(o) => o.clone(),
            VariantState::Array(a) => a.convert_to_object(),
            other => {
                let object = Object::new();
                object.set("value", Variant::with_state(other.clone()));
                object
            }
        }
    }

    // ---- Mutators ----

    /// Replace this Variant's kind and payload in place, atomically
    /// from the caller's point of view. Any other handle aliasing this
    /// same node observes the new value immediately.
    pub fn assign(&self, value: impl Into<Variant>) {
        let value = value.into();
        let new_state = value.0.borrow().clone();
        *self.0.borrow_mut() = new_state;
    }

    fn ensure_array(&self) {
        let needs_coercion = !matches!(&*self.0.borrow(), VariantState::Array(_));
        if !needs_coercion {
            return;
        }
        let former = std::mem::replace(&mut *self.0.borrow_mut(), VariantState::Null);
        let array = match former {
            VariantState::Null => Array::new(),
            VariantState::Object(o) => {
                // Not reached by the public dispatch rules (integer
                // indices stringify against an Object before this is
                // called), but defensively preserve contents rather
                // than discarding them.
                o.try_convert_to_array()
                    .unwrap_or_else(|| Array::from_variants(vec![Variant::object(o)]))
            }
            scalar => Array::from_variants(vec![Variant::with_state(scalar)]),
        };
        *self.0.borrow_mut() = VariantState::Array(array);
    }

    fn ensure_object(&self) {
        let needs_coercion = !matches!(&*self.0.borrow(), VariantState::Object(_));
        if !needs_coercion {
            return;
        }
        let former = std::mem::replace(&mut *self.0.borrow_mut(), VariantState::Null);
        let object = match former {
            VariantState::Null => Object::new(),
            VariantState::Array(a) => a.convert_to_object(),
            scalar => {
                let object = Object::new();
                object.set("value", Variant::with_state(scalar));
                object
            }
        };
        *self.0.borrow_mut() = VariantState::Object(object);
    }

    fn resolve(&self, sel: Selector) -> Resolved {
        match sel {
            Selector::Index(i) => {
                let is_object = matches!(&*self.0.borrow(), VariantState::Object(_));
                if is_object {
                    return self.resolve(Selector::Key(i.to_string()));
                }
                self.ensure_array();
                let VariantState::Array(arr) = &*self.0.borrow() else {
                    unreachable!("ensure_array just established the Array kind")
                };
                Resolved::Arr(arr.clone(), i)
            }
            Selector::Key(k) => {
                let as_index = match &*self.0.borrow() {
                    VariantState::Array(_) => k.parse::<usize>().ok(),
                    _ => None,
                };
                if let Some(i) = as_index {
                    let VariantState::Array(arr) = &*self.0.borrow() else {
                        unreachable!()
                    };
                    return Resolved::Arr(arr.clone(), i);
                }
                self.ensure_object();
                let VariantState::Object(obj) = &*self.0.borrow() else {
                    unreachable!("ensure_object just established the Object kind")
                };
                Resolved::Obj(obj.clone(), k)
            }
        }
    }

    /// Non-mutating peek: dispatches to the Array/Object accessor
    /// without coercing the Variant or extending the target container.
    /// Scalars and absent slots simply yield Null.
    pub fn get(&self, sel: impl Into<Selector>) -> Variant {
        let sel = sel.into();
        match (&*self.0.borrow(), sel) {
            (VariantState::Object(o), Selector::Key(k)) => o.get(&k),
            (VariantState::Object(o), Selector::Index(i)) => o.get(&i.to_string()),
            (VariantState::Array(a), Selector::Index(i)) => a.get(i),
            (VariantState::Array(a), Selector::Key(k)) => k
                .parse::<usize>()
                .map(|i| a.get(i))
                .unwrap_or_else(|_| Variant::null()),
            _ => Variant::null(),
        }
    }

    /// Indexed access: the coercing, extending accessor described by
    /// the cross-kind dispatch rules (an integer index against an
    /// Object is stringified; a non-numeric key against an Array
    /// coerces the whole Variant to an Object; either against a scalar
    /// coerces it to the appropriate container first).
    pub fn index(&self, sel: impl Into<Selector>) -> Variant {
        match self.resolve(sel.into()) {
            Resolved::Arr(arr, i) => arr.get_mut(i),
            Resolved::Obj(obj, k) => obj.get_mut(&k),
        }
    }

    pub fn set(&self, sel: impl Into<Selector>, value: impl Into<Variant>) {
        match self.resolve(sel.into()) {
            Resolved::Arr(arr, i) => arr.set(i, value),
            Resolved::Obj(obj, k) => obj.set(&k, value),
        }
    }

    /// Coerce a non-composite Variant to an Array (wrapping the former
    /// scalar as its sole element) and append; on an existing Array,
    /// append directly. On an existing Object, append under the next
    /// unused integer-string key — the dual of how `set` on an Array
    /// stringifies indices when coercing to Object.
    pub fn add(&self, value: impl Into<Variant>) {
        let is_object = matches!(&*self.0.borrow(), VariantState::Object(_));
        if is_object {
            let VariantState::Object(obj) = &*self.0.borrow() else {
                unreachable!()
            };
            let next_key = obj.count().to_string();
            obj.set(&next_key, value);
            return;
        }
        self.ensure_array();
        let VariantState::Array(arr) = &*self.0.borrow() else {
            unreachable!("ensure_array just established the Array kind")
        };
        arr.add(value);
    }

    /// Interprets a dot-separated path as a sequence of trimmed keys,
    /// following Object by key and Array by integer-valued key. Pure
    /// read: returns Null at the first unresolvable step without
    /// coercing anything.
    pub fn pick(&self, path: &str) -> Variant {
        let mut current = self.clone();
        for segment in path.split('.') {
            current = current.get(segment.trim());
        }
        current
    }

    /// Deep clone: scalars copied, containers recursively cloned into
    /// fresh, independent bodies.
    pub fn duplicate(&self) -> Variant {
        self.duplicate_bounded(0, 64)
    }

    pub(crate) fn duplicate_bounded(&self, depth: usize, max_depth: usize) -> Variant {
        if depth >= max_depth {
            return Variant::null();
        }
        let state = match &*self.0.borrow() {
            VariantState::Array(a) => VariantState::Array(a.duplicate_bounded(depth + 1, max_depth)),
            VariantState::Object(o) => {
                VariantState::Object(o.duplicate_bounded(depth + 1, max_depth))
            }
            other => other.clone(),
        };
        Variant::with_state(state)
    }

    /// True when kinds match and scalar payloads are equal; for Array
    /// and Object, true only when both handles reference the same body.
    pub fn equals(&self, other: &Variant) -> bool {
        match (&*self.0.borrow(), &*other.0.borrow()) {
            (VariantState::Null, VariantState::Null) => true,
            (VariantState::Boolean(a), VariantState::Boolean(b)) => a == b,
            (VariantState::Integer(a), VariantState::Integer(b)) => a == b,
            (VariantState::Float(a), VariantState::Float(b)) => a == b,
            (VariantState::String(a), VariantState::String(b)) => a == b,
            (VariantState::Array(a), VariantState::Array(b)) => a == b,
            (VariantState::Object(a), VariantState::Object(b)) => a == b,
            _ => false,
        }
    }

    /// True when both trees are structurally equal (recursive value
    /// comparison), bounded by `max_depth`.
    pub fn equivalent(&self, other: &Variant, max_depth: usize) -> Result<bool, FormatError> {
        self.equivalent_bounded(other, 0, max_depth)
    }

    pub(crate) fn equivalent_bounded(
        &self,
        other: &Variant,
        depth: usize,
        max_depth: usize,
    ) -> Result<bool, FormatError> {
        if depth >= max_depth {
            return Err(FormatError::MaxDepthExceeded { max_depth });
        }
        match (&*self.0.borrow(), &*other.0.borrow()) {
            (VariantState::Null, VariantState::Null) => Ok(true),
            (VariantState::Boolean(a), VariantState::Boolean(b)) => Ok(a == b),
            (VariantState::Integer(a), VariantState::Integer(b)) => Ok(a == b),
            (VariantState::Float(a), VariantState::Float(b)) => Ok(a == b),
            (VariantState::String(a), VariantState::String(b)) => Ok(a == b),
            (VariantState::Array(a), VariantState::Array(b)) => {
                a.equivalent_bounded(b, depth + 1, max_depth)
            }
            (VariantState::Object(a), VariantState::Object(b)) => {
                a.equivalent_bounded(b, depth + 1, max_depth)
            }
            _ => Ok(false),
        }
    }
}

fn parse_leading_i64(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

fn parse_leading_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    match trimmed {
        "NaN" => return Some(f64::NAN),
        "Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    trimmed.parse::<f64>().ok()
}

macro_rules! impl_from_scalar {
    ($ty:ty, $state:expr) => {
        impl From<$ty> for Variant {
            fn from(value: $ty) -> Self {
                #[allow(clippy::redundant_closure_call)]
                Variant::with_state(($state)(value))
            }
        }
    };
}

impl_from_scalar!(bool, VariantState::Boolean);
impl_from_scalar!(i64, VariantState::Integer);
impl_from_scalar!(f64, VariantState::Float);
impl_from_scalar!(String, VariantState::String);

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Variant::with_state(VariantState::Integer(value as i64))
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Self {
        Variant::with_state(VariantState::Float(value as f64))
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::with_state(VariantState::String(value.to_string()))
    }
}

impl From<Array> for Variant {
    fn from(value: Array) -> Self {
        Variant::array(value)
    }
}

impl From<Object> for Variant {
    fn from(value: Object) -> Self {
        Variant::object(value)
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexive_equals_and_duplicate_equivalence() {
        let v = Variant::from("hi");
        assert!(v.equals(&v));
        let d = v.duplicate();
        assert!(v.equivalent(&d, 64).unwrap());
    }

    #[test]
    fn duplicate_of_composite_is_not_equal_but_is_equivalent() {
        let arr = Array::new();
        arr.add(1i64);
        let v = Variant::from(arr);
        let d = v.duplicate();
        assert!(!v.equals(&d));
        assert!(v.equivalent(&d, 64).unwrap());
    }

    #[test]
    fn auto_coercion_add_then_set_builds_mixed_object() {
        let v = Variant::null();
        v.add(1i64);
        v.add("x");
        assert!(v.is_array());
        v.set("k", true);
        assert!(v.is_object());
        assert_eq!(v.get("0").as_long(), 1);
        assert_eq!(v.get("1").as_string(), "x");
        assert!(v.get("k").as_bool());
    }

    #[test]
    fn sharing_object_handle_is_observed_through_aliases() {
        let object = Object::new();
        let o = Variant::object(object);
        o.set("a", 1i64);
        let p = o.clone();
        p.set("a", 2i64);
        assert_eq!(o.get("a").as_long(), 2);
    }

    #[test]
    fn is_empty_matches_table() {
        assert!(Variant::null().is_empty());
        assert!(Variant::from(false).is_empty());
        assert!(Variant::from(0i64).is_empty());
        assert!(Variant::from(0.0).is_empty());
        assert!(Variant::from("").is_empty());
        assert!(!Variant::from("x").is_empty());
        assert!(!Variant::from(1i64).is_empty());
    }

    #[test]
    fn pick_resolves_nested_path_and_stops_at_first_miss() {
        let root = Object::new();
        let mid = Object::new();
        let leaf = Object::new();
        leaf.set("1", "hit");
        mid.set("1", leaf);
        root.set("1", mid);
        let v = Variant::object(root);
        assert_eq!(v.pick("1.1.1").as_string(), "hit");
        assert!(v.pick("1.2.1").is_null());
    }

    #[test]
    fn try_as_accessors_reject_kind_mismatch_without_coercing() {
        let v = Variant::from(1i64);
        assert_eq!(v.try_as_long(), Some(1));
        assert_eq!(v.try_as_string(), None);
        assert_eq!(v.try_as_bool(), None);
    }

    #[test]
    fn array_index_read_extends_and_get_does_not() {
        let arr = Array::new();
        let v = Variant::array(arr);
        assert!(v.get(5).is_null());
        assert_eq!(v.kind(), Kind::Array);
        let slot = v.index(5);
        assert!(slot.is_null());
        assert_eq!(v.as_array().count(), 6);
    }
}
