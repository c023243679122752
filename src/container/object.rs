//! [`Object`]: a value-typed handle over an insertion-ordered mapping
//! from strings to [`Variant`]s (the *object body*). Backed by
//! `indexmap::IndexMap`, which already provides the insertion-order
//! iteration this contract requires without reimplementing a
//! parallel-vec-plus-hashtable structure by hand.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::FormatError;
use crate::variant::Variant;

use super::Array;

#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<IndexMap<String, Variant>>>);

impl Object {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(IndexMap::new())))
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<Variant> {
        self.0.borrow().values().cloned().collect()
    }

    /// Read without inserting; an absent key returns a fresh Null Variant.
    pub fn get(&self, key: &str) -> Variant {
        self.0
            .borrow()
            .get(key)
            .cloned()
            .unwrap_or_else(Variant::null)
    }

    /// Indexed read: if the key is absent, inserts a Null Variant under
    /// it and returns that slot.
    pub fn get_mut(&self, key: &str) -> Variant {
        let mut body = self.0.borrow_mut();
        body.entry(key.to_string())
            .or_insert_with(Variant::null)
            .clone()
    }

    /// Insert-or-replace. When a slot already exists, it is mutated in
    /// place via `Variant::assign` so its identity (the Rc node) stays
    /// valid across the update — callers holding an earlier `get_mut`
    /// handle observe the new value.
    pub fn set(&self, key: &str, value: impl Into<Variant>) {
        let mut body = self.0.borrow_mut();
        match body.get(key) {
            Some(existing) => existing.assign(value),
            None => {
                body.insert(key.to_string(), value.into());
            }
        }
    }

    /// Insert, failing (returning `false`) if the key already exists.
    pub fn add(&self, key: &str, value: impl Into<Variant>) -> bool {
        let mut body = self.0.borrow_mut();
        if body.contains_key(key) {
            false
        } else {
            body.insert(key.to_string(), value.into());
            true
        }
    }

    pub fn remove(&self, key: &str) -> Option<Variant> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Succeeds iff every key parses as a non-negative integer; builds
    /// an Array sized to the largest parsed index + 1, with later
    /// duplicate-index entries (in insertion order) overwriting earlier
    /// ones and no slot left undefined within the range.
    pub fn try_convert_to_array(&self) -> Option<Array> {
        let body = self.0.borrow();
        let mut indexed = Vec::with_capacity(body.len());
        let mut max_index: Option<usize> = None;
        for (key, value) in body.iter() {
            let index: usize = key.parse().ok()?;
            max_index = Some(max_index.map_or(index, |m| m.max(index)));
            indexed.push((index, value.clone()));
        }
        let array = Array::new();
        if let Some(max_index) = max_index {
            array.resize(max_index + 1);
        }
        for (index, value) in indexed {
            array.set(index, value);
        }
        Some(array)
    }

    /// True iff empty, or a single entry whose value is non-composite.
    pub fn is_simple(&self) -> bool {
        let body = self.0.borrow();
        match body.len() {
            0 => true,
            1 => !body.values().next().unwrap().is_composite(),
            _ => false,
        }
    }

    pub fn duplicate(&self) -> Object {
        self.duplicate_bounded(0, 64)
    }

    pub(crate) fn duplicate_bounded(&self, depth: usize, max_depth: usize) -> Object {
        if depth >= max_depth {
            return Object::new();
        }
        let cloned: IndexMap<String, Variant> = self
            .0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.duplicate_bounded(depth + 1, max_depth)))
            .collect();
        Object(Rc::new(RefCell::new(cloned)))
    }

    pub fn equivalent(&self, other: &Object, max_depth: usize) -> Result<bool, FormatError> {
        self.equivalent_bounded(other, 0, max_depth)
    }

    pub(crate) fn equivalent_bounded(
        &self,
        other: &Object,
        depth: usize,
        max_depth: usize,
    ) -> Result<bool, FormatError> {
        if depth >= max_depth {
            return Err(FormatError::MaxDepthExceeded { max_depth });
        }
        if Rc::ptr_eq(&self.0, &other.0) {
            return Ok(true);
        }
        let a = self.0.borrow();
        let b = other.0.borrow();
        if a.len() != b.len() {
            return Ok(false);
        }
        for (key, value) in a.iter() {
            match b.get(key) {
                Some(other_value) => {
                    if !value.equivalent_bounded(other_value, depth + 1, max_depth)? {
                        return Ok(false);
                    }
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Object {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_absent_key_does_not_mutate() {
        let obj = Object::new();
        let v = obj.get("missing");
        assert!(v.is_null());
        assert!(!obj.contains_key("missing"));
    }

    #[test]
    fn get_mut_inserts_null_slot() {
        let obj = Object::new();
        let v = obj.get_mut("k");
        assert!(v.is_null());
        assert!(obj.contains_key("k"));
    }

    #[test]
    fn set_preserves_slot_identity() {
        let obj = Object::new();
        obj.set("a", 1i64);
        let slot = obj.get("a");
        obj.set("a", 2i64);
        assert_eq!(slot.as_long(), 2);
    }

    #[test]
    fn add_fails_on_existing_key() {
        let obj = Object::new();
        assert!(obj.add("a", 1i64));
        assert!(!obj.add("a", 2i64));
    }

    #[test]
    fn try_convert_to_array_rejects_non_integer_keys() {
        let obj = Object::new();
        obj.set("a", 1i64);
        assert!(obj.try_convert_to_array().is_none());
    }

    #[test]
    fn try_convert_to_array_fills_gaps_with_null() {
        let obj = Object::new();
        obj.set("2", "c".to_string());
        obj.set("0", "a".to_string());
        let arr = obj.try_convert_to_array().unwrap();
        assert_eq!(arr.count(), 3);
        assert!(arr.get(1).is_null());
    }
}
