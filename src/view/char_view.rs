//! `CharView`: an immutable `(buffer, offset, length)` window over a
//! 16-bit code unit buffer — the char-alphabet counterpart of
//! [`super::ByteView`], used by the `parse_str`/`parse_utf16` entry
//! point and the shared string cache's char table.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::{algo, NumberParse};

/// An immutable slice of 16-bit code units, with cheap (refcount-bump)
/// cloning and slicing. Equality, ordering, and hashing are by
/// *content*, not by buffer identity or offset — this is what makes
/// the string cache's intern stability property hold: two views whose
/// code units are equal always hash and compare equal, regardless of
/// which underlying buffer they were sliced from.
#[derive(Clone)]
pub struct CharView {
    buffer: Rc<[u16]>,
    offset: usize,
    length: usize,
}

impl CharView {
    pub fn new(buffer: Rc<[u16]>) -> Self {
        let length = buffer.len();
        Self {
            buffer,
            offset: 0,
            length,
        }
    }

    pub fn from_units(units: &[u16]) -> Self {
        Self::new(Rc::from(units))
    }

    pub fn from_str(text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        Self::new(Rc::from(units))
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn as_units(&self) -> &[u16] {
        &self.buffer[self.offset..self.offset + self.length]
    }

    /// Indexing one past the end is legal and returns a synthetic zero
    /// unit (the parser's reader relies on this for end-of-input checks).
    pub fn unit_at(&self, index: usize) -> u16 {
        self.as_units().get(index).copied().unwrap_or(0)
    }

    pub fn slice(&self, start: usize, length: usize) -> CharView {
        let start = start.min(self.length);
        let length = length.min(self.length - start);
        CharView {
            buffer: Rc::clone(&self.buffer),
            offset: self.offset + start,
            length,
        }
    }

    pub fn starts_with(&self, prefix: &[u16]) -> bool {
        algo::starts_with(self.as_units(), prefix)
    }

    pub fn starts_with_ignore_case(&self, prefix: &[u16]) -> bool {
        algo::starts_with_ignore_case(self.as_units(), prefix)
    }

    pub fn ends_with(&self, suffix: &[u16]) -> bool {
        algo::ends_with(self.as_units(), suffix)
    }

    pub fn ends_with_ignore_case(&self, suffix: &[u16]) -> bool {
        algo::ends_with_ignore_case(self.as_units(), suffix)
    }

    pub fn trim(&self) -> CharView {
        let (start, end) = algo::trim(self.as_units());
        self.slice(start, end - start)
    }

    pub fn split(&self, is_sep: impl FnMut(u16) -> bool) -> Vec<CharView> {
        algo::split(self.as_units(), is_sep)
            .into_iter()
            .map(|(s, e)| self.slice(s, e - s))
            .collect()
    }

    pub fn parse_i32(&self) -> NumberParse<i32> {
        algo::parse_i32(self.as_units())
    }

    pub fn parse_i64(&self) -> NumberParse<i64> {
        algo::parse_i64(self.as_units())
    }

    pub fn parse_f64(&self) -> NumberParse<f64> {
        algo::parse_f64(self.as_units())
    }

    pub fn to_owned_string(&self) -> String {
        String::from_utf16_lossy(self.as_units())
    }
}

impl PartialEq for CharView {
    fn eq(&self, other: &Self) -> bool {
        self.as_units() == other.as_units()
    }
}

impl Eq for CharView {}

impl PartialOrd for CharView {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharView {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        algo::cmp(self.as_units(), other.as_units())
    }
}

impl Hash for CharView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_units().hash(state);
    }
}

impl std::fmt::Debug for CharView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CharView({:?})", self.to_owned_string())
    }
}
