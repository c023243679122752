//! An unlocked string cache exclusive to a single parse call. The
//! parser constructs one of these at the start of `parse_*` and drops
//! it when the call returns; nothing outside that call ever observes
//! or shares it, so a `RefCell` suffices — no `Mutex` overhead on the
//! hot path.

use std::cell::RefCell;

use super::{CacheInner, CacheKey, Interner, DEFAULT_MAX_LENGTH};

pub struct TemporaryCache<K: CacheKey> {
    inner: RefCell<CacheInner<K>>,
}

impl<K: CacheKey> Default for TemporaryCache<K> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl<K: CacheKey> TemporaryCache<K> {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: RefCell::new(CacheInner::new(max_length)),
        }
    }

    pub fn get(&self, key: K, make: impl FnOnce() -> String) -> String {
        self.inner.borrow_mut().get_or_insert_with(key, make)
    }

    pub fn try_get(&self, key: &K) -> Option<String> {
        self.inner.borrow().try_get(key)
    }

    pub fn set(&self, key: K, value: String) {
        self.inner.borrow_mut().set(key, value);
    }
}

impl<K: CacheKey> Interner<K> for TemporaryCache<K> {
    fn get(&self, key: K, make: impl FnOnce() -> String) -> String {
        TemporaryCache::get(self, key, make)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CharView;

    #[test]
    fn intern_stability_within_a_single_parse_call() {
        let cache: TemporaryCache<CharView> = TemporaryCache::default();
        let a = CharView::from_str("hello");
        let b = CharView::from_str("hello");
        let sa = cache.get(a, || "hello".to_string());
        let sb = cache.get(b, || panic!("should have hit the cache"));
        assert!(std::ptr::eq(sa.as_str(), sa.as_str()));
        assert_eq!(sa, sb);
    }
}
