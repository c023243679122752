//! # Conversion Context
//!
//! A task-local, re-entrant object carrying (a) the current conversion
//! depth, for cycle defence, and (b) a stack of active converters
//! (§4.6). This is the seam an external, reflection-driven marshaller
//! (out of scope per §1) plugs into: it acquires a depth guard before
//! descending into a recursive conversion and pushes/pops its own
//! [`Converter`] while doing so.
//!
//! Implemented as `thread_local!` storage rather than true task-local
//! propagation — the closest stable-Rust analogue, and sufficient for
//! the "acquire/release bracket any conversion call" contract as long
//! as a caller doesn't move a half-finished conversion across threads.

pub mod primitives;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ConversionError;
use crate::variant::Variant;

/// A converter pushed onto the conversion context by a marshaller
/// before it descends into a nested conversion, so that code running
/// deeper in the same call (e.g. a custom field converter) can read it
/// back via [`current_converter`].
pub trait Converter {
    fn convert_to_variant(&self, value: &dyn std::any::Any) -> Result<Variant, ConversionError>;
    fn convert_from_variant(&self, value: &Variant) -> Result<Box<dyn std::any::Any>, ConversionError>;
}

struct ContextState {
    depth: usize,
    max_depth: usize,
    converters: Vec<Rc<dyn Converter>>,
}

impl ContextState {
    fn new() -> Self {
        Self {
            depth: 0,
            max_depth: 64,
            converters: Vec::new(),
        }
    }
}

thread_local! {
    static CONTEXT: RefCell<ContextState> = RefCell::new(ContextState::new());
}

/// RAII depth bracket: acquired on entry to a conversion call, released
/// (decrementing the shared counter) on drop. The counter returns to
/// zero, and is logically cleared, once every guard created during a
/// top-level conversion has been dropped.
pub struct DepthGuard {
    _private: (),
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        CONTEXT.with(|c| {
            let mut state = c.borrow_mut();
            state.depth = state.depth.saturating_sub(1);
        });
    }
}

/// Acquire a depth guard, configuring the context's maximum depth on
/// the outermost (depth == 0) call. Fails with
/// [`ConversionError::TooDeep`] if acquiring would exceed it.
pub fn enter(max_depth: usize) -> Result<DepthGuard, ConversionError> {
    CONTEXT.with(|c| {
        let mut state = c.borrow_mut();
        if state.depth == 0 {
            state.max_depth = max_depth;
        }
        if state.depth >= state.max_depth {
            tracing::warn!(max_depth = state.max_depth, "conversion context too deep");
            return Err(ConversionError::TooDeep {
                max_depth: state.max_depth,
            });
        }
        state.depth += 1;
        Ok(DepthGuard { _private: () })
    })
}

pub fn current_depth() -> usize {
    CONTEXT.with(|c| c.borrow().depth)
}

/// Push a converter onto the context's stack; the marshaller pops it
/// (via [`pop_converter`]) once its recursive conversion returns.
pub fn push_converter(converter: Rc<dyn Converter>) {
    CONTEXT.with(|c| c.borrow_mut().converters.push(converter));
}

pub fn pop_converter() -> Option<Rc<dyn Converter>> {
    CONTEXT.with(|c| c.borrow_mut().converters.pop())
}

/// The innermost active converter, as seen by code running during a
/// nested conversion initiated from within a convertible type.
pub fn current_converter() -> Option<Rc<dyn Converter>> {
    CONTEXT.with(|c| c.borrow().converters.last().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_guard_releases_on_drop() {
        assert_eq!(current_depth(), 0);
        {
            let _g = enter(4).unwrap();
            assert_eq!(current_depth(), 1);
            {
                let _g2 = enter(4).unwrap();
                assert_eq!(current_depth(), 2);
            }
            assert_eq!(current_depth(), 1);
        }
        assert_eq!(current_depth(), 0);
    }

    #[test]
    fn exceeding_max_depth_fails() {
        let mut guards = Vec::new();
        for _ in 0..3 {
            guards.push(enter(3).unwrap());
        }
        assert!(enter(3).is_err());
    }

    #[test]
    fn converter_stack_is_lifo() {
        struct Noop;
        impl Converter for Noop {
            fn convert_to_variant(
                &self,
                _value: &dyn std::any::Any,
            ) -> Result<Variant, ConversionError> {
                Ok(Variant::null())
            }
            fn convert_from_variant(
                &self,
                _value: &Variant,
            ) -> Result<Box<dyn std::any::Any>, ConversionError> {
                Ok(Box::new(()))
            }
        }
        assert!(current_converter().is_none());
        push_converter(Rc::new(Noop));
        assert!(current_converter().is_some());
        pop_converter();
        assert!(current_converter().is_none());
    }
}
