//! A dynamic, mutable JSON value tree: a [`Variant`] node holding
//! Null/Boolean/Integer/Float/String/Array/Object, shared-mutable
//! [`Array`]/[`Object`] container handles, a lenient dual-alphabet
//! (UTF-16 and UTF-8) parser with integrated string interning, and a
//! policy-driven JSON emitter.
//!
//! ```
//! use dyson::parser::parse_str;
//! use dyson::emit::char_emitter::to_string_pretty;
//!
//! let v = parse_str(r#"{ a: 1, b: [1, 2,], }"#).unwrap();
//! assert_eq!(v.get("a").as_long(), 1);
//! println!("{}", to_string_pretty(&v).unwrap());
//! ```
//!
//! The reflection-driven marshaller that converts between this tree
//! and user-defined record types is outside this crate's scope — see
//! [`convert`] for the contract such a marshaller plugs into.

pub mod cache;
pub mod container;
pub mod convert;
pub mod emit;
pub mod error;
pub mod literals;
pub mod parser;
pub mod variant;
pub mod view;

pub use container::{Array, Object};
pub use error::{ConversionError, FormatError, ParseError, Position};
pub use variant::{Kind, Selector, Variant};
