//! The three node shapes an [`Error`] can be built from.
//!
//! Nodes are immutable once constructed and each owns the stack captured
//! when it was built. They are only created through the constructors in
//! this crate; callers reach them through [`Error::node`] or typed
//! extraction ([`Error::find`]).
//!
//! | Variant   | Holds                      | Compact render            |
//! |-----------|----------------------------|---------------------------|
//! | `Plain`   | message, stack             | `message`                 |
//! | `Wrapped` | message, cause, stack      | `message: cause`          |
//! | `Coded`   | coder, cause, stack        | `display: cause` / `cause`|
//!
//! `{}` renders compact, `{:#}` renders verbose.

use std::error::Error as StdError;
use std::fmt;

use crate::format;
use crate::{Coder, Error, StackTrace};

// ── Plain ─────────────────────────────────────────────────────────

/// A terminal node: a message and the stack where it was created.
pub struct Plain {
    message: String,
    stack: StackTrace,
}

impl Plain {
    pub(crate) fn new(message: String, stack: StackTrace) -> Self {
        Self { message, stack }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }
}

impl fmt::Display for Plain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return format::write_plain_verbose(self, f);
        }
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Plain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plain")
            .field("message", &self.message)
            .field("stack", &self.stack)
            .finish()
    }
}

impl StdError for Plain {}

// ── Wrapped ───────────────────────────────────────────────────────

/// A context message layered over a cause, with its own stack.
pub struct Wrapped {
    message: String,
    cause: Error,
    stack: StackTrace,
}

impl Wrapped {
    pub(crate) fn new(message: String, cause: Error, stack: StackTrace) -> Self {
        Self { message, cause, stack }
    }

    /// This layer's message only, without the cause.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &Error {
        &self.cause
    }

    pub(crate) fn take_cause(&mut self) -> Error {
        std::mem::replace(&mut self.cause, Error::detached())
    }

    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return format::write_wrapped_verbose(self, f);
        }
        format::write_wrapped_compact(self, f)
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("message", &self.message)
            .field("cause", &format_args!("{}", self.cause))
            .field("stack", &self.stack)
            .finish()
    }
}

impl StdError for Wrapped {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}

// ── Coded ─────────────────────────────────────────────────────────

/// A [`Coder`] attached to a cause, with its own stack.
pub struct Coded {
    coder: Coder,
    cause: Error,
    stack: StackTrace,
}

impl Coded {
    pub(crate) fn new(coder: Coder, cause: Error, stack: StackTrace) -> Self {
        Self { coder, cause, stack }
    }

    pub fn coder(&self) -> Coder {
        self.coder
    }

    pub fn cause(&self) -> &Error {
        &self.cause
    }

    pub(crate) fn take_cause(&mut self) -> Error {
        std::mem::replace(&mut self.cause, Error::detached())
    }

    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }
}

impl fmt::Display for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return format::write_coded_verbose(self, f);
        }
        // A blank label contributes nothing visible.
        format::write_coded_compact(self, f)
    }
}

impl fmt::Debug for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coded")
            .field("coder", &self.coder)
            .field("cause", &format_args!("{}", self.cause))
            .field("stack", &self.stack)
            .finish()
    }
}

impl StdError for Coded {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}
