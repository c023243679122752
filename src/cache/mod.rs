//! # String Cache
//!
//! A bidirectional map from a view ([`CharView`](crate::view::CharView) or
//! [`ByteView`](crate::view::ByteView)) to an interned `String`, plus an
//! override map (view → explicit replacement string). Two concrete
//! variants exist:
//!
//! - [`shared::SharedCache`] — all operations serialised under a single
//!   `Mutex`; meant to be held for the lifetime of the process (or of a
//!   long-lived parser) and shared across threads, with the explicit
//!   caveat (per the concurrency model) that throughput is not a design
//!   goal.
//! - [`temporary::TemporaryCache`] — no locking, exclusive to a single
//!   parse call.
//!
//! Both are generic over the view type via [`CacheKey`], so the same
//! implementation backs both the char-alphabet and byte-alphabet tables
//! without duplicating the bookkeeping logic (unlike the views
//! themselves, which intentionally stay monomorphised per alphabet on
//! the parser's hot path — see the `view` module docs).
//!
//! **Invariant:** once interned, a `(view, string)` binding is stable
//! for the cache's lifetime — there is no eviction, only the optional
//! `release` sweep described below.

pub mod shared;
pub mod temporary;

pub use shared::SharedCache;
pub use temporary::TemporaryCache;

use std::collections::HashMap;
use std::hash::Hash;

use crate::view::{ByteView, CharView};

/// Anything usable as a cache key: cheap to clone (a view is a
/// refcounted slice), and compared/hashed by content.
pub trait CacheKey: Clone + Eq + Hash {
    fn unit_len(&self) -> usize;
}

impl CacheKey for CharView {
    fn unit_len(&self) -> usize {
        self.len()
    }
}

impl CacheKey for ByteView {
    fn unit_len(&self) -> usize {
        self.len()
    }
}

/// Either concrete cache variant, generic so the parser can be written
/// once per alphabet and handed whichever cache flavour the caller
/// wants (a private [`temporary::TemporaryCache`] for a one-off parse,
/// or a [`shared::SharedCache`] to intern across many parse calls).
pub(crate) trait Interner<K: CacheKey> {
    fn get(&self, key: K, make: impl FnOnce() -> String) -> String;
}

/// Default cap (in units) beyond which a view is never interned —
/// neither read nor written. A few kilobytes is generous for typical
/// object keys and short string values while still bounding the
/// cache's memory growth against pathological inputs (a single huge
/// string literal should not permanently occupy the intern table).
pub const DEFAULT_MAX_LENGTH: usize = 4096;

/// Shared bookkeeping used by both cache variants. Kept private: each
/// variant wraps this in the synchronization primitive appropriate to
/// its sharing model (`Mutex` vs none).
pub(crate) struct CacheInner<K: CacheKey> {
    interned: HashMap<K, String>,
    overrides: HashMap<K, String>,
    max_length: usize,
}

impl<K: CacheKey> CacheInner<K> {
    fn new(max_length: usize) -> Self {
        Self {
            interned: HashMap::new(),
            overrides: HashMap::new(),
            max_length,
        }
    }

    fn try_get(&self, key: &K) -> Option<String> {
        self.overrides
            .get(key)
            .or_else(|| self.interned.get(key))
            .cloned()
    }

    fn set(&mut self, key: K, value: String) {
        self.overrides.insert(key, value);
    }

    /// Materialise `key` via `make`, interning it when within the
    /// length cap. `make` is only invoked on a cache miss.
    fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> String) -> String {
        if let Some(hit) = self.try_get(&key) {
            return hit;
        }
        let value = make();
        if key.unit_len() <= self.max_length {
            self.interned.insert(key, value.clone());
        }
        value
    }
}
