//! Compact and verbose rendering.
//!
//! Compact rendering (`{}`) is the message chain on one line. Verbose
//! rendering (`{:#}`, and `{:?}` on [`Error`](crate::Error)) always starts
//! with the compact line, then adds what only operators need:
//!
//! ```text
//! outer: mid: root                 ← compact line
//!     at app::start (src/main.rs:12)
//!     at ...                       ← this node's stack
//! Caused by: mid: root             ← each cause in turn, outermost first
//!     at app::init (src/init.rs:40)
//! Caused by: root
//!     at app::db::connect (src/db.rs:7)
//! ```
//!
//! Coded nodes add a `code: …, http status: …` line under their message.
//! Groups list each member's verbose render, labelled `[i/n]` and indented.
//! Unresolvable frames render as `at <unknown> (0x…)`; rendering a trace
//! never fails.

use std::error::Error as StdError;
use std::fmt::{self, Write};

use crate::group::ErrorGroup;
use crate::node::{Coded, Plain, Wrapped};
use crate::{Coder, Error, Node, StackTrace};

const FRAME_INDENT: &str = "    ";
const MEMBER_INDENT: &str = "    ";

// Chains can be arbitrarily deep; both renderers walk causes in a loop
// and only recurse into group members.

/// `message: cause`, walking the cause chain iteratively.
pub(crate) fn write_wrapped_compact(node: &Wrapped, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: ", node.message())?;
    write_compact(node.cause(), f)
}

/// `display: cause`, or just `cause` when the label is blank.
pub(crate) fn write_coded_compact(node: &Coded, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_label(f, &node.coder())?;
    write_compact(node.cause(), f)
}

fn write_compact(mut err: &Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    loop {
        match err.node() {
            Node::Plain(n) => return f.write_str(n.message()),
            Node::Wrapped(n) => {
                write!(f, "{}: ", n.message())?;
                err = n.cause();
            }
            Node::Coded(n) => {
                write_label(f, &n.coder())?;
                err = n.cause();
            }
            Node::Group(g) => return write_group_compact(g, f),
            Node::Foreign(e) => return write!(f, "{}", e),
        }
    }
}

fn write_label(f: &mut fmt::Formatter<'_>, coder: &Coder) -> fmt::Result {
    if coder.display().is_empty() {
        Ok(())
    } else {
        write!(f, "{}: ", coder.display())
    }
}

pub(crate) fn write_plain_verbose(node: &Plain, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(node.message())?;
    write_stack(f, node.stack())
}

pub(crate) fn write_wrapped_verbose(node: &Wrapped, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_wrapped_compact(node, f)?;
    write_stack(f, node.stack())?;
    write_causes_verbose(node.cause(), f)
}

pub(crate) fn write_coded_verbose(node: &Coded, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_coded_compact(node, f)?;
    write_coder(f, &node.coder())?;
    write_stack(f, node.stack())?;
    write_causes_verbose(node.cause(), f)
}

/// One `Caused by:` block per link, outermost first.
fn write_causes_verbose(mut err: &Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    loop {
        f.write_str("\nCaused by: ")?;
        match err.node() {
            Node::Plain(n) => return write_plain_verbose(n, f),
            Node::Wrapped(n) => {
                write_wrapped_compact(n, f)?;
                write_stack(f, n.stack())?;
                err = n.cause();
            }
            Node::Coded(n) => {
                write_coded_compact(n, f)?;
                write_coder(f, &n.coder())?;
                write_stack(f, n.stack())?;
                err = n.cause();
            }
            Node::Group(g) => return write_group_verbose(g, f),
            Node::Foreign(e) => return write_foreign_verbose(e, f),
        }
    }
}

/// Group message and members on one line, e.g. `validation failed: a; b`.
pub(crate) fn write_group_compact(group: &ErrorGroup, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(message) = group.message() {
        f.write_str(message)?;
        if !group.is_empty() {
            f.write_str(": ")?;
        }
    }
    for (i, member) in group.errors().iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write_compact(member, f)?;
    }
    Ok(())
}

pub(crate) fn write_group_verbose(group: &ErrorGroup, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_group_compact(group, f)?;
    let total = group.len();
    for (i, member) in group.errors().iter().enumerate() {
        f.write_str("\n")?;
        let mut out = Indented::new(&mut *f, MEMBER_INDENT);
        write!(out, "[{}/{}] {:#}", i + 1, total, member)?;
    }
    Ok(())
}

/// Foreign errors carry no stack; print their own `source()` chain instead.
pub(crate) fn write_foreign_verbose(
    err: &(dyn StdError + Send + Sync + 'static),
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{}", err)?;
    let mut source = err.source();
    while let Some(cause) = source {
        write!(f, "\nCaused by: {}", cause)?;
        source = cause.source();
    }
    Ok(())
}

fn write_stack(f: &mut fmt::Formatter<'_>, stack: &StackTrace) -> fmt::Result {
    for symbol in stack.symbols() {
        write!(f, "\n{}{}", FRAME_INDENT, symbol)?;
    }
    Ok(())
}

fn write_coder(f: &mut fmt::Formatter<'_>, coder: &Coder) -> fmt::Result {
    write!(f, "\n{}code: {}, http status: {}", FRAME_INDENT, coder.code(), coder.http_status())?;
    if !coder.reference().is_empty() {
        write!(f, ", reference: {}", coder.reference())?;
    }
    Ok(())
}

/// Prefixes every line written through it, including the first.
struct Indented<'a, W: ?Sized> {
    inner: &'a mut W,
    indent: &'static str,
    at_line_start: bool,
}

impl<'a, W: Write + ?Sized> Indented<'a, W> {
    fn new(inner: &'a mut W, indent: &'static str) -> Self {
        Self { inner, indent, at_line_start: true }
    }
}

impl<W: Write + ?Sized> Write for Indented<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for (i, line) in s.split('\n').enumerate() {
            if i > 0 {
                self.inner.write_char('\n')?;
                self.at_line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.at_line_start {
                self.inner.write_str(self.indent)?;
                self.at_line_start = false;
            }
            self.inner.write_str(line)?;
        }
        Ok(())
    }
}
