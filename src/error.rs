//! # Error Types for the Dynamic Value Core
//!
//! This module defines the three error categories the core can raise,
//! mirroring the three places the core can fail: parsing, emitting, and
//! converting.
//!
//! ## Design
//! - [`ParseError`] carries the 1-based line and 0-based column of the
//!   input position where a syntactic violation was found.
//! - [`FormatError`] is raised by the emitter, either because the
//!   configured maximum depth was exceeded (the cycle guard) or because
//!   a non-finite float was encountered under the `Throw` special-float
//!   policy.
//! - [`ConversionError`] is raised by the conversion context when the
//!   marshaller-facing depth counter overflows, or propagated verbatim
//!   from a marshaller that refused a conversion.
//!
//! None of these derive `thiserror`; `Display` and `std::error::Error`
//! are implemented by hand, keeping each message's wording under direct
//! control.

use std::fmt;

/// A 1-based line, 0-based column position in parser input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A syntactic violation found while parsing JSON-shaped input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {} ({})", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

/// A failure raised by the emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatError {
    /// The tree descended deeper than the policy's configured maximum depth.
    MaxDepthExceeded { max_depth: usize },
    /// A non-finite float (`NaN`/`Infinity`/`-Infinity`) was encountered
    /// while the policy's special-float handling was set to `Throw`.
    NonFiniteFloat(f64),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MaxDepthExceeded { max_depth } => {
                write!(f, "FormatError: exceeded maximum depth of {}", max_depth)
            }
            FormatError::NonFiniteFloat(value) => write!(
                f,
                "FormatError: non-finite float {} is not representable under the current policy",
                value
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// A failure raised by the conversion context or a marshaller built on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The conversion-context depth counter exceeded its configured maximum;
    /// this is the circular-reference guard described for the conversion context.
    TooDeep { max_depth: usize },
    /// A marshaller-level conversion refused to proceed (wrong kind, missing
    /// field, unsupported target type, ...).
    Refused(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::TooDeep { max_depth } => write!(
                f,
                "ConversionError: too deep (> {}) - circular reference suspected",
                max_depth
            ),
            ConversionError::Refused(msg) => write!(f, "ConversionError: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}
