use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::format;
use crate::group::ErrorGroup;
use crate::node::{Coded, Plain, Wrapped};
use crate::{Coder, StackTrace};

/// The error value handed around by this crate.
///
/// A cheap-to-clone shared handle over one of a closed set of
/// representations:
///
/// - **Plain**: message + stack. Terminal.
/// - **Wrapped**: context message + cause + stack.
/// - **Coded**: [`Coder`] + cause + stack.
/// - **Group**: an [`ErrorGroup`] of independent members.
/// - **Foreign**: any other `std::error::Error`, boxed. Terminal as far as
///   this crate's chain walking goes.
///
/// `Repr` stays private; callers match on [`Error::node`] or use the
/// inspection methods.
///
/// Cloning shares the node; a cause referenced by several wrappers is
/// never copied. Every node is immutable after construction, so `Error`
/// is `Send + Sync` and can be built and inspected from any thread.
///
/// # Rendering
///
/// - `{}`: compact, the message chain, e.g. `outer: mid: root`.
/// - `{:#}` and `{:?}`: verbose, compact line, then stacks and causes.
#[derive(Clone)]
pub struct Error {
    repr: Arc<Repr>,
}

pub(crate) enum Repr {
    Plain(Plain),
    Wrapped(Wrapped),
    Coded(Coded),
    Group(ErrorGroup),
    Foreign(Box<dyn StdError + Send + Sync + 'static>),
}

/// Borrowed view of an [`Error`]'s representation, for exhaustive matching.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Plain(&'a Plain),
    Wrapped(&'a Wrapped),
    Coded(&'a Coded),
    Group(&'a ErrorGroup),
    Foreign(&'a (dyn StdError + Send + Sync + 'static)),
}

// ── Constructors ──────────────────────────────────────────────────

impl Error {
    fn from_repr(repr: Repr) -> Self {
        Self { repr: Arc::new(repr) }
    }

    pub(crate) fn plain(message: String, stack: StackTrace) -> Self {
        Self::from_repr(Repr::Plain(Plain::new(message, stack)))
    }

    pub(crate) fn wrapped(cause: Error, message: String, stack: StackTrace) -> Self {
        Self::from_repr(Repr::Wrapped(Wrapped::new(message, cause, stack)))
    }

    pub(crate) fn coded(cause: Error, coder: Coder, stack: StackTrace) -> Self {
        Self::from_repr(Repr::Coded(Coded::new(coder, cause, stack)))
    }

    pub(crate) fn group(group: ErrorGroup) -> Self {
        Self::from_repr(Repr::Group(group))
    }

    /// Layer a context message over this error, capturing a new stack here.
    ///
    /// ```
    /// let err = serror::new("db down").wrap("service init failed");
    /// assert_eq!(err.to_string(), "service init failed: db down");
    /// ```
    #[inline(never)]
    pub fn wrap(self, text: impl Into<String>) -> Self {
        Self::wrapped(self, text.into(), StackTrace::capture(1))
    }

    /// Attach a coder to this error, capturing a new stack here.
    ///
    /// `None` is replaced by [`Coder::UNKNOWN`].
    #[inline(never)]
    pub fn with_code(self, coder: impl Into<Option<Coder>>) -> Self {
        let coder = coder.into().unwrap_or(Coder::UNKNOWN);
        Self::coded(self, coder, StackTrace::capture(1))
    }

    /// Bring any `std::error::Error` into this crate's error value.
    ///
    /// Values that already are an `Error`, a node or an `ErrorGroup` are
    /// unboxed rather than nested; anything else becomes a foreign node
    /// with no stack of its own.
    pub fn from_std<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    /// Boxed counterpart of [`Error::from_std`].
    pub fn from_boxed(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        let err = match err.downcast::<Error>() {
            Ok(ours) => return *ours,
            Err(other) => other,
        };
        let err = match err.downcast::<Plain>() {
            Ok(node) => return Self::from_repr(Repr::Plain(*node)),
            Err(other) => other,
        };
        let err = match err.downcast::<Wrapped>() {
            Ok(node) => return Self::from_repr(Repr::Wrapped(*node)),
            Err(other) => other,
        };
        let err = match err.downcast::<Coded>() {
            Ok(node) => return Self::from_repr(Repr::Coded(*node)),
            Err(other) => other,
        };
        match err.downcast::<ErrorGroup>() {
            Ok(group) => Self::group(*group),
            Err(other) => Self::from_repr(Repr::Foreign(other)),
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Error {
    /// Borrowed view of the representation.
    #[inline]
    pub fn node(&self) -> Node<'_> {
        match &*self.repr {
            Repr::Plain(n) => Node::Plain(n),
            Repr::Wrapped(n) => Node::Wrapped(n),
            Repr::Coded(n) => Node::Coded(n),
            Repr::Group(g) => Node::Group(g),
            Repr::Foreign(e) => Node::Foreign(&**e),
        }
    }

    /// The stack captured when this node was built.
    /// `None` for groups and foreign errors.
    pub fn stack(&self) -> Option<&StackTrace> {
        match &*self.repr {
            Repr::Plain(n) => Some(n.stack()),
            Repr::Wrapped(n) => Some(n.stack()),
            Repr::Coded(n) => Some(n.stack()),
            Repr::Group(_) | Repr::Foreign(_) => None,
        }
    }

    /// Single-step unwrap: the cause of a Wrapped or Coded node.
    #[inline]
    pub fn next_cause(&self) -> Option<&Error> {
        match &*self.repr {
            Repr::Wrapped(n) => Some(n.cause()),
            Repr::Coded(n) => Some(n.cause()),
            Repr::Plain(_) | Repr::Group(_) | Repr::Foreign(_) => None,
        }
    }

    /// Multi-step unwrap: every member of a group, the single cause of a
    /// Wrapped or Coded node, nothing otherwise.
    pub fn causes(&self) -> &[Error] {
        match &*self.repr {
            Repr::Wrapped(n) => std::slice::from_ref(n.cause()),
            Repr::Coded(n) => std::slice::from_ref(n.cause()),
            Repr::Group(g) => g.errors(),
            Repr::Plain(_) | Repr::Foreign(_) => &[],
        }
    }

    /// The coder attached to this node itself, without walking.
    #[inline]
    pub(crate) fn own_coder(&self) -> Option<Coder> {
        match &*self.repr {
            Repr::Coded(n) => Some(n.coder()),
            _ => None,
        }
    }

    /// True if both handles share the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.repr, &other.repr)
    }

    pub(crate) fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match &*self.repr {
            Repr::Plain(n) => n as &(dyn StdError + 'static),
            Repr::Wrapped(n) => n as &(dyn StdError + 'static),
            Repr::Coded(n) => n as &(dyn StdError + 'static),
            Repr::Group(g) => g as &(dyn StdError + 'static),
            Repr::Foreign(e) => &**e,
        }
    }
}

// ── Drop ──────────────────────────────────────────────────────────

impl Error {
    /// Shared placeholder left behind when a cause is unlinked on drop.
    pub(crate) fn detached() -> Self {
        static DETACHED: OnceLock<Error> = OnceLock::new();
        DETACHED
            .get_or_init(|| Error::plain(String::new(), StackTrace::empty()))
            .clone()
    }
}

/// Move the causes of a node this handle owns alone onto `pending`.
fn detach_causes(repr: &mut Arc<Repr>, pending: &mut Vec<Error>) {
    let Some(repr) = Arc::get_mut(repr) else {
        return;
    };
    match repr {
        Repr::Wrapped(n) => pending.push(n.take_cause()),
        Repr::Coded(n) => pending.push(n.take_cause()),
        Repr::Group(g) => pending.append(&mut g.take_errors()),
        Repr::Plain(_) | Repr::Foreign(_) => {}
    }
}

impl Drop for Error {
    /// Tears chains down with a worklist instead of nested drops, so the
    /// depth of a chain never bounds the thread stack.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_causes(&mut self.repr, &mut pending);
        while let Some(mut err) = pending.pop() {
            detach_causes(&mut err.repr, &mut pending);
        }
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl StdError for Error {
    /// The cause for Wrapped and Coded nodes. Groups have several causes
    /// and report none here; use [`Error::causes`].
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &*self.repr {
            Repr::Wrapped(n) => Some(n.cause() as &(dyn StdError + 'static)),
            Repr::Coded(n) => Some(n.cause() as &(dyn StdError + 'static)),
            Repr::Foreign(e) => e.source(),
            Repr::Plain(_) | Repr::Group(_) => None,
        }
    }
}

// ── Display ───────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.repr {
            Repr::Plain(n) => fmt::Display::fmt(n, f),
            Repr::Wrapped(n) => fmt::Display::fmt(n, f),
            Repr::Coded(n) => fmt::Display::fmt(n, f),
            Repr::Group(g) => fmt::Display::fmt(g, f),
            Repr::Foreign(e) if f.alternate() => format::write_foreign_verbose(&**e, f),
            Repr::Foreign(e) => write!(f, "{}", e),
        }
    }
}

// ── Debug ─────────────────────────────────────────────────────────

impl fmt::Debug for Error {
    /// Same as `{:#}`, so `main` returning `Result<(), Error>` prints the
    /// full chain with stacks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self)
    }
}
