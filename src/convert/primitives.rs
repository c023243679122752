//! The fixed, never-failing conversions a marshaller built on this
//! crate plugs into the value tree at its leaves (§6.3): every signed
//! and unsigned integer width, 32/64-bit floats, booleans, single code
//! units, strings, and the Array/Object/Variant handles themselves.
//! Unsigned 64-bit traffics through `f64`, matching the table in §4.1
//! (Variant has no native unsigned-integer kind).

use crate::container::{Array, Object};
use crate::variant::Variant;

/// Which primitive shape a conversion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    String,
    Array,
    Object,
    Variant,
}

/// A materialised primitive value of one of the [`PrimitiveKind`] shapes.
#[derive(Debug, Clone)]
pub enum PrimitiveValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Char(char),
    String(String),
    Array(Array),
    Object(Object),
    Variant(Variant),
}

/// Coerce `variant` into the shape named by `target`. Like every
/// Variant accessor, this never fails — out-of-range values saturate.
pub fn primitive_from_variant(variant: &Variant, target: PrimitiveKind) -> PrimitiveValue {
    match target {
        PrimitiveKind::I8 => {
            PrimitiveValue::I8(variant.as_long().clamp(i8::MIN as i64, i8::MAX as i64) as i8)
        }
        PrimitiveKind::I16 => {
            PrimitiveValue::I16(variant.as_long().clamp(i16::MIN as i64, i16::MAX as i64) as i16)
        }
        PrimitiveKind::I32 => PrimitiveValue::I32(variant.as_int()),
        PrimitiveKind::I64 => PrimitiveValue::I64(variant.as_long()),
        PrimitiveKind::U8 => {
            PrimitiveValue::U8(variant.as_long().clamp(0, u8::MAX as i64) as u8)
        }
        PrimitiveKind::U16 => {
            PrimitiveValue::U16(variant.as_long().clamp(0, u16::MAX as i64) as u16)
        }
        PrimitiveKind::U32 => {
            PrimitiveValue::U32(variant.as_long().clamp(0, u32::MAX as i64) as u32)
        }
        PrimitiveKind::U64 => {
            // Traffics through double per the converter-plugin contract.
            PrimitiveValue::U64(variant.as_double().max(0.0) as u64)
        }
        PrimitiveKind::F32 => PrimitiveValue::F32(variant.as_double() as f32),
        PrimitiveKind::F64 => PrimitiveValue::F64(variant.as_double()),
        PrimitiveKind::Bool => PrimitiveValue::Bool(variant.as_bool()),
        PrimitiveKind::Char => {
            PrimitiveValue::Char(variant.as_string().chars().next().unwrap_or('\0'))
        }
        PrimitiveKind::String => PrimitiveValue::String(variant.as_string()),
        PrimitiveKind::Array => PrimitiveValue::Array(variant.as_array()),
        PrimitiveKind::Object => PrimitiveValue::Object(variant.as_object()),
        PrimitiveKind::Variant => PrimitiveValue::Variant(variant.clone()),
    }
}

/// Build a Variant from any fixed primitive shape.
pub fn variant_from_primitive(value: PrimitiveValue) -> Variant {
    match value {
        PrimitiveValue::I8(v) => Variant::from(v as i64),
        PrimitiveValue::I16(v) => Variant::from(v as i64),
        PrimitiveValue::I32(v) => Variant::from(v),
        PrimitiveValue::I64(v) => Variant::from(v),
        PrimitiveValue::U8(v) => Variant::from(v as i64),
        PrimitiveValue::U16(v) => Variant::from(v as i64),
        PrimitiveValue::U32(v) => Variant::from(v as i64),
        PrimitiveValue::U64(v) => Variant::from(v as f64),
        PrimitiveValue::F32(v) => Variant::from(v),
        PrimitiveValue::F64(v) => Variant::from(v),
        PrimitiveValue::Bool(v) => Variant::from(v),
        PrimitiveValue::Char(v) => Variant::from(v.to_string()),
        PrimitiveValue::String(v) => Variant::from(v),
        PrimitiveValue::Array(v) => Variant::from(v),
        PrimitiveValue::Object(v) => Variant::from(v),
        PrimitiveValue::Variant(v) => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_64_round_trips_through_double() {
        let v = variant_from_primitive(PrimitiveValue::U64(12345));
        match primitive_from_variant(&v, PrimitiveKind::U64) {
            PrimitiveValue::U64(n) => assert_eq!(n, 12345),
            _ => unreachable!(),
        }
    }

    #[test]
    fn narrowing_saturates_rather_than_panics() {
        let v = Variant::from(1000i64);
        match primitive_from_variant(&v, PrimitiveKind::I8) {
            PrimitiveValue::I8(n) => assert_eq!(n, i8::MAX),
            _ => unreachable!(),
        }
    }
}
