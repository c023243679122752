//! A string cache safe to share across threads: every operation takes
//! the same `Mutex`, matching the concurrency model's explicit
//! "throughput is not a design concern" stance for this variant.

use std::sync::Mutex;

use super::{CacheInner, CacheKey, Interner, DEFAULT_MAX_LENGTH};

pub struct SharedCache<K: CacheKey> {
    inner: Mutex<CacheInner<K>>,
}

impl<K: CacheKey> Default for SharedCache<K> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl<K: CacheKey> SharedCache<K> {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::new(max_length)),
        }
    }

    /// Return the interned string for `key`, materialising and
    /// interning it via `make` on first sight. Views longer than the
    /// cache's max length are materialised fresh on every call and
    /// never stored.
    pub fn get(&self, key: K, make: impl FnOnce() -> String) -> String {
        let mut inner = self.inner.lock().expect("string cache mutex poisoned");
        inner.get_or_insert_with(key, make)
    }

    pub fn try_get(&self, key: &K) -> Option<String> {
        let inner = self.inner.lock().expect("string cache mutex poisoned");
        inner.try_get(key)
    }

    pub fn set(&self, key: K, value: String) {
        let mut inner = self.inner.lock().expect("string cache mutex poisoned");
        inner.set(key, value);
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("string cache mutex poisoned");
        inner.interned.len() + inner.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: CacheKey> Interner<K> for SharedCache<K> {
    fn get(&self, key: K, make: impl FnOnce() -> String) -> String {
        SharedCache::get(self, key, make)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ByteView;

    #[test]
    fn repeated_get_with_equal_content_yields_same_string() {
        let cache: SharedCache<ByteView> = SharedCache::default();
        let a = ByteView::from_bytes(b"xxhelloxx").slice(2, 5);
        let b = ByteView::from_bytes(b"hello");
        let sa = cache.get(a, || "hello".to_string());
        let sb = cache.get(b, || panic!("should have hit the cache"));
        assert_eq!(sa, sb);
    }

    #[test]
    fn set_overrides_subsequent_get() {
        let cache: SharedCache<ByteView> = SharedCache::default();
        let view = ByteView::from_bytes(b"raw");
        cache.set(view.clone(), "replaced".to_string());
        assert_eq!(cache.try_get(&view), Some("replaced".to_string()));
    }

    #[test]
    fn views_longer_than_max_length_are_never_interned() {
        let cache: SharedCache<ByteView> = SharedCache::new(2);
        let view = ByteView::from_bytes(b"abc");
        let _ = cache.get(view.clone(), || "abc".to_string());
        assert_eq!(cache.try_get(&view), None);
    }
}
