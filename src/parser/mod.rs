//! # Parser
//!
//! Two readers, one per input alphabet, sharing the same lenient
//! grammar (see module docs on [`char_parser`] and [`byte_parser`]):
//! both are generic only over which string cache backs them
//! ([`crate::cache::temporary::TemporaryCache`] for a one-off call, or
//! a [`crate::cache::shared::SharedCache`] to intern across many
//! calls), so that grammar logic is written once per alphabet and
//! duplicated only where the alphabet itself (`u16` vs `u8`, `CharView`
//! vs `ByteView`) genuinely differs — kept separate rather than made
//! fully generic so the hot path stays monomorphised (see the `view`
//! module docs for the same rationale applied one layer down).

pub mod byte_parser;
pub mod char_parser;

pub use crate::error::ParseError;

use crate::cache::{SharedCache, TemporaryCache};
use crate::view::{ByteView, CharView};
use crate::variant::Variant;

/// Parse UTF-8 text, interning strings only for the duration of this call.
pub fn parse_str(text: &str) -> Result<Variant, ParseError> {
    tracing::debug!(len = text.len(), "parsing UTF-8 text");
    let cache = TemporaryCache::<CharView>::default();
    let result = char_parser::parse(CharView::from_str(text), &cache);
    if let Err(err) = &result {
        tracing::warn!(%err, "parse failed");
    }
    result
}

/// Parse a sequence of UTF-16 code units, interning strings only for
/// the duration of this call.
pub fn parse_utf16(units: &[u16]) -> Result<Variant, ParseError> {
    let cache = TemporaryCache::<CharView>::default();
    char_parser::parse(CharView::from_units(units), &cache)
}

/// Parse UTF-16 code units against a cache shared across many parse
/// calls, so repeated literals intern once process-wide.
pub fn parse_utf16_with_cache(
    units: &[u16],
    cache: &SharedCache<CharView>,
) -> Result<Variant, ParseError> {
    char_parser::parse(CharView::from_units(units), cache)
}

/// Parse raw UTF-8 bytes, interning strings only for the duration of this call.
pub fn parse_bytes(bytes: &[u8]) -> Result<Variant, ParseError> {
    let cache = TemporaryCache::<ByteView>::default();
    byte_parser::parse(ByteView::from_bytes(bytes), &cache)
}

/// Parse raw UTF-8 bytes against a cache shared across many parse calls.
pub fn parse_bytes_with_cache(
    bytes: &[u8],
    cache: &SharedCache<ByteView>,
) -> Result<Variant, ParseError> {
    byte_parser::parse(ByteView::from_bytes(bytes), cache)
}

pub(crate) fn is_bare_token_unit_ascii(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.' | b'_')
}
