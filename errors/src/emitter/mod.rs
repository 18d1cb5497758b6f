// Copyright (C) 2019-2025 Aleo Systems Inc.
// This file is part of the Radian library.

// The Radian library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Radian library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Radian library. If not, see <https://www.gnu.org/licenses/>.

use crate::RadianError;

use core::fmt;
use std::{cell::RefCell, rc::Rc};

/// Types that are sinks for compiler errors.
pub trait Emitter {
    /// Emit the error `err`.
    fn emit_err(&mut self, err: RadianError);
}

/// A trivial `Emitter` using the standard error stream.
///
/// Errors print one line each, in the `<path>, line L(C1-C2): <message>`
/// shape the `Formatted` payload renders.
pub struct StderrEmitter;

impl Emitter for StderrEmitter {
    fn emit_err(&mut self, err: RadianError) {
        eprintln!("{err}");
    }
}

/// A buffer of `T`s.
#[derive(Debug)]
pub struct Buffer<T>(Vec<T>);

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Buffer<T> {
    /// Push `x` to the buffer.
    pub fn push(&mut self, x: T) {
        self.0.push(x);
    }

    /// Extract the underlying list of Ts.
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }

    /// The number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (count, element) in self.0.iter().enumerate() {
            if count > 0 {
                writeln!(f)?;
            }
            element.fmt(f)?;
        }
        Ok(())
    }
}

/// A buffer of errors.
pub type ErrBuffer = Buffer<RadianError>;

/// An `Emitter` that collects into a buffer, for use in tests.
#[derive(Clone, Default)]
pub struct BufferEmitter(Rc<RefCell<ErrBuffer>>);

impl BufferEmitter {
    /// Returns a new buffered emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts all the errors collected in this emitter.
    pub fn extract_errs(&self) -> ErrBuffer {
        self.0.take()
    }
}

impl Emitter for BufferEmitter {
    fn emit_err(&mut self, err: RadianError) {
        self.0.borrow_mut().push(err);
    }
}

/// Contains the actual data for `Handler`.
/// Modeled this way to afford an API using interior mutability.
struct HandlerInner {
    /// The number of errors emitted thus far.
    count: usize,
    /// The sink through which errors are emitted.
    emitter: Box<dyn Emitter>,
}

/// A handler deals with errors and other compiler output.
///
/// This is the error channel between the compiler phases and the host:
/// phases call [`Handler::emit_err`] to report, and the driver consults
/// [`Handler::had_errors`] before trusting the constructed graph.
pub struct Handler {
    /// The inner handler.
    inner: RefCell<HandlerInner>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new(Box::new(StderrEmitter))
    }
}

impl Handler {
    /// Construct a `Handler` using the given `emitter`.
    pub fn new(emitter: Box<dyn Emitter>) -> Self {
        Self { inner: RefCell::new(HandlerInner { count: 0, emitter }) }
    }

    /// Construct a `Handler` that will append to `buf`.
    pub fn new_with_buf() -> (Self, BufferEmitter) {
        let buf = BufferEmitter::new();
        let handler = Self::new(Box::new(buf.clone()));
        (handler, buf)
    }

    /// Runs `logic` provided a handler that collects all errors into the `String` returned.
    pub fn with<T>(logic: impl FnOnce(&Handler) -> Result<T, RadianError>) -> Result<T, String> {
        let (handler, buf) = Handler::new_with_buf();
        let result = logic(&handler);
        let errs = buf.extract_errs();
        if errs.is_empty() { result.map_err(|e| e.to_string()) } else { Err(errs.to_string()) }
    }

    /// Emit the error `err`.
    pub fn emit_err<E: Into<RadianError>>(&self, err: E) {
        let mut inner = self.inner.borrow_mut();
        inner.count = inner.count.saturating_add(1);
        inner.emitter.emit_err(err.into());
    }

    /// Have any errors been emitted since the handler was created?
    pub fn had_errors(&self) -> bool {
        self.inner.borrow().count > 0
    }

    /// The number of errors emitted thus far.
    pub fn err_count(&self) -> usize {
        self.inner.borrow().count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserError;
    use radian_span::Span;

    #[test]
    fn buffered_emitter_counts() {
        let (handler, buf) = Handler::new_with_buf();
        assert!(!handler.had_errors());
        handler.emit_err(ParserError::unmatched_end_block(Span::dummy()));
        handler.emit_err(ParserError::unexpected_eof(Span::dummy()));
        assert_eq!(handler.err_count(), 2);
        assert_eq!(buf.extract_errs().len(), 2);
    }
}
