//! Free-function constructors.
//!
//! Each one captures a stack at its caller, so they are kept out of line
//! and never call one another: an extra frame in between would shift the
//! trace by one.

use crate::{Coder, Error, StackTrace};

/// A plain error: message and stack.
///
/// ```
/// let err = serror::new("connection refused");
/// assert_eq!(err.to_string(), "connection refused");
/// ```
#[inline(never)]
pub fn new(text: impl Into<String>) -> Error {
    Error::plain(text.into(), StackTrace::capture(1))
}

/// Layer a context message over `err`. `None` in, `None` out.
///
/// ```
/// assert!(serror::wrap(None, "ctx").is_none());
///
/// let err = serror::wrap(Some(serror::new("db down")), "service init failed");
/// assert_eq!(err.unwrap().to_string(), "service init failed: db down");
/// ```
#[inline(never)]
pub fn wrap(err: Option<Error>, text: impl Into<String>) -> Option<Error> {
    let cause = err?;
    Some(Error::wrapped(cause, text.into(), StackTrace::capture(1)))
}

/// Same as [`wrap`].
#[inline(never)]
pub fn with_message(err: Option<Error>, text: impl Into<String>) -> Option<Error> {
    let cause = err?;
    Some(Error::wrapped(cause, text.into(), StackTrace::capture(1)))
}

/// A plain error categorized by `coder` (or [`Coder::UNKNOWN`] if `None`).
///
/// The stack is kept on the coded node only; the inner plain message
/// carries none, so verbose output does not print the same frames twice.
///
/// ```
/// use serror::Coder;
///
/// const NOT_FOUND: Coder = Coder::new(10101, 404, "UserNotFound", "");
/// let err = serror::new_with_code(NOT_FOUND, "user jane not found");
/// assert_eq!(err.to_string(), "UserNotFound: user jane not found");
/// assert!(serror::is_code(&err, NOT_FOUND));
/// ```
#[inline(never)]
pub fn new_with_code(coder: impl Into<Option<Coder>>, text: impl Into<String>) -> Error {
    let coder = coder.into().unwrap_or(Coder::UNKNOWN);
    let cause = Error::plain(text.into(), StackTrace::empty());
    Error::coded(cause, coder, StackTrace::capture(1))
}

/// Attach a coder to `err`. `None` in, `None` out; a missing coder
/// becomes [`Coder::UNKNOWN`].
#[inline(never)]
pub fn with_code(err: Option<Error>, coder: impl Into<Option<Coder>>) -> Option<Error> {
    let cause = err?;
    let coder = coder.into().unwrap_or(Coder::UNKNOWN);
    Some(Error::coded(cause, coder, StackTrace::capture(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, Plain};

    #[test]
    fn new_is_plain() {
        let err = new("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert!(matches!(err.node(), Node::Plain(_)));
    }

    #[test]
    fn wrap_none_is_none() {
        assert!(wrap(None, "ctx").is_none());
        assert!(with_message(None, "ctx").is_none());
        assert!(with_code(None, Coder::UNKNOWN).is_none());
        assert!(with_code(None, None).is_none());
    }

    #[test]
    fn wrap_keeps_cause() {
        let base = new("db down");
        let err = wrap(Some(base.clone()), "service init failed").unwrap();
        assert_eq!(err.to_string(), "service init failed: db down");
        assert!(err.next_cause().unwrap().ptr_eq(&base));
    }

    #[test]
    fn with_message_matches_wrap() {
        let a = wrap(Some(new("x")), "y").unwrap();
        let b = with_message(Some(new("x")), "y").unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn new_with_code_shape() {
        let coder = Coder::new(10101, 404, "UserNotFound", "");
        let err = new_with_code(coder, "user jane not found");
        assert_eq!(err.to_string(), "UserNotFound: user jane not found");
        let inner = err.next_cause().unwrap();
        match inner.node() {
            Node::Plain(p) => {
                assert_eq!(p.message(), "user jane not found");
                assert!(p.stack().is_empty());
            }
            _ => panic!("expected a plain cause"),
        }
    }

    #[test]
    fn missing_coder_is_unknown() {
        let err = new_with_code(None, "boom");
        assert_eq!(err.coder(), Some(Coder::UNKNOWN));
        assert_eq!(err.to_string(), "An internal server error occurred: boom");

        let err = with_code(Some(new("boom")), None).unwrap();
        assert_eq!(err.coder(), Some(Coder::UNKNOWN));
    }

    #[test]
    fn each_wrap_gets_its_own_stack() {
        let err = wrap(Some(new("root")), "outer").unwrap();
        let outer = err.stack().unwrap();
        let inner = err.next_cause().unwrap().stack().unwrap();
        assert!(!std::ptr::eq(outer, inner));
        assert!(err.find::<Plain>().is_some());
    }
}
