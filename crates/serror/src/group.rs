use std::error::Error as StdError;
use std::fmt;

use crate::format;
use crate::{Error, Node};

/// A collection of independent errors, optionally under a summary message.
///
/// Members keep insertion order. Adding `None` is a no-op, so results of
/// fallible steps can be fed in directly:
///
/// ```
/// use serror::ErrorGroup;
///
/// let mut group = ErrorGroup::with_message("validation failed");
/// group.add(serror::new("name is empty"));
/// group.add(None);
/// group.add(serror::new("age is negative"));
/// assert_eq!(group.to_string(), "validation failed: name is empty; age is negative");
/// ```
///
/// `add` takes `&mut self`; sharing a group between threads while adding
/// needs the caller's own synchronization (a `Mutex<ErrorGroup>`, or
/// collect per thread and [`Extend`] at the end). Once converted into an
/// [`Error`] the group is frozen.
#[derive(Default)]
pub struct ErrorGroup {
    message: Option<String>,
    errors: Vec<Error>,
}

impl ErrorGroup {
    /// An empty group without a summary message.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty group with a summary message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    /// Append a member; `None` is ignored.
    pub fn add(&mut self, err: impl Into<Option<Error>>) {
        if let Some(err) = err.into() {
            self.errors.push(err);
        }
    }

    /// Members in insertion order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub(crate) fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Splice members of nested anonymous groups into this one.
    ///
    /// Only groups without a summary message are spliced, recursively;
    /// a nested group with a message keeps its own line in the output.
    pub fn flatten(self) -> Self {
        let mut out = Vec::with_capacity(self.errors.len());
        for err in self.errors {
            splice(err, &mut out);
        }
        Self {
            message: self.message,
            errors: out,
        }
    }

    /// Collapse the group to the simplest equivalent value.
    ///
    /// - no members: `None`
    /// - a single member and no summary message: that member
    /// - anything else: the group itself, as an [`Error`]
    pub fn reduce(mut self) -> Option<Error> {
        if self.errors.is_empty() {
            return None;
        }
        if self.errors.len() == 1 && self.message.is_none() {
            return self.errors.pop();
        }
        Some(Error::group(self))
    }
}

fn splice(err: Error, out: &mut Vec<Error>) {
    if let Node::Group(inner) = err.node() {
        if inner.message().is_none() {
            for member in inner.errors() {
                splice(member.clone(), out);
            }
            return;
        }
    }
    out.push(err);
}

impl fmt::Display for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            format::write_group_verbose(self, f)
        } else {
            format::write_group_compact(self, f)
        }
    }
}

impl fmt::Debug for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.debug_struct("ErrorGroup")
            .field("message", &self.message)
            .field("errors", &members)
            .finish()
    }
}

impl StdError for ErrorGroup {}

impl From<ErrorGroup> for Error {
    fn from(group: ErrorGroup) -> Self {
        Error::group(group)
    }
}

impl Extend<Error> for ErrorGroup {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl Extend<Option<Error>> for ErrorGroup {
    fn extend<I: IntoIterator<Item = Option<Error>>>(&mut self, iter: I) {
        self.errors.extend(iter.into_iter().flatten());
    }
}

impl FromIterator<Error> for ErrorGroup {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        Self {
            message: None,
            errors: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<Option<Error>> for ErrorGroup {
    fn from_iter<I: IntoIterator<Item = Option<Error>>>(iter: I) -> Self {
        Self {
            message: None,
            errors: iter.into_iter().flatten().collect(),
        }
    }
}
