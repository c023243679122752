//! # Literals Table
//!
//! The small set of well-known bare tokens the parser recognises
//! (`null`, `true`, `false`, `NaN`, `Infinity`, `-Infinity`), each
//! pre-encoded once in both alphabets and referenced by value from the
//! hot parsing path. Built once via `once_cell::sync::Lazy`, the same
//! pattern the reference runtime uses for its own global tables (see
//! `FILE_HANDLES` in its builtins module).

use once_cell::sync::Lazy;

pub static NULL_BYTES: &[u8] = b"null";
pub static TRUE_BYTES: &[u8] = b"true";
pub static FALSE_BYTES: &[u8] = b"false";
pub static NAN_BYTES: &[u8] = b"NaN";
pub static INFINITY_BYTES: &[u8] = b"Infinity";
pub static NEG_INFINITY_BYTES: &[u8] = b"-Infinity";

pub static NULL_UNITS: Lazy<Vec<u16>> = Lazy::new(|| encode_units(NULL_BYTES));
pub static TRUE_UNITS: Lazy<Vec<u16>> = Lazy::new(|| encode_units(TRUE_BYTES));
pub static FALSE_UNITS: Lazy<Vec<u16>> = Lazy::new(|| encode_units(FALSE_BYTES));
pub static NAN_UNITS: Lazy<Vec<u16>> = Lazy::new(|| encode_units(NAN_BYTES));
pub static INFINITY_UNITS: Lazy<Vec<u16>> = Lazy::new(|| encode_units(INFINITY_BYTES));
pub static NEG_INFINITY_UNITS: Lazy<Vec<u16>> = Lazy::new(|| encode_units(NEG_INFINITY_BYTES));

fn encode_units(ascii: &[u8]) -> Vec<u16> {
    ascii.iter().map(|&b| b as u16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_and_unit_encodings_agree() {
        assert_eq!(TRUE_UNITS.len(), TRUE_BYTES.len());
        for (unit, byte) in TRUE_UNITS.iter().zip(TRUE_BYTES.iter()) {
            assert_eq!(*unit, *byte as u16);
        }
    }
}
