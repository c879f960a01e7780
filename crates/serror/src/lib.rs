//! # serror — Stacked Error
//!
//! Errors that remember where they were built. Every node captures the call
//! stack at its construction site; wrapping adds a context message and a new
//! stack, coding attaches a numeric [`Coder`] with a suggested HTTP status,
//! and groups collect independent failures into one value.
//!
//! ## Design
//!
//! [`Error`] is a cheap-to-clone handle over a closed set of immutable nodes:
//!
//! - **Plain**: message + stack. Terminal.
//! - **Wrapped**: context message + cause + stack.
//! - **Coded**: coder + cause + stack.
//! - **Group**: an [`ErrorGroup`] of members, optionally with a message.
//! - **Foreign**: any other `std::error::Error` brought in with `?`.
//!
//! Stacks are captured as raw instruction pointers and only symbolized when
//! someone asks for the verbose rendering, so building an error stays cheap.
//!
//! ## Quick Start
//!
//! ```rust
//! use serror::{Coder, ResultExt};
//!
//! const ERR_USER_NOT_FOUND: Coder = Coder::new(110001, 404, "UserNotFound", "");
//!
//! fn find_user(name: &str) -> serror::Result<u32> {
//!     serror::bail!(ERR_USER_NOT_FOUND => "user {} not found", name)
//! }
//!
//! fn handler() -> serror::Result<u32> {
//!     find_user("jane").wrap("loading profile")
//! }
//!
//! let err = handler().unwrap_err();
//!
//! // Compact, for API responses.
//! assert_eq!(err.to_string(), "loading profile: UserNotFound: user jane not found");
//!
//! // Category, for transport mapping.
//! let status = serror::parse_coder(&err).http_status();
//! assert_eq!(status, 404);
//!
//! // Verbose, for operators: messages, coder, stacks, causes.
//! let verbose = format!("{:#}", err);
//! assert!(verbose.starts_with("loading profile: UserNotFound: user jane not found"));
//! ```
//!
//! ## Rendering
//!
//! | Format | Output |
//! |--------|--------|
//! | `{}`   | compact: `outer: mid: root` |
//! | `{:#}` | verbose: compact line, coder line, stack frames, `Caused by:` blocks |
//! | `{:?}` | same as `{:#}` |
//!
//! ## Configuration
//!
//! Stack capture reads `SERROR_STACK` and `SERROR_STACK_DEPTH` on first use,
//! or takes an explicit [`StackConfig`] through [`config::install`].
//!
//! ## Feature Flags
//!
//! | Flag        | Effect |
//! |-------------|--------|
//! | `backtrace` | (default) walks the stack with the `backtrace` crate; without it every trace is empty |

pub mod codes;
pub mod config;
mod env;
mod stack;
mod coder;
mod node;
mod error;
mod group;
mod format;
#[macro_use]
mod macros;
mod constructors;
mod inspect;
mod convert;

// ── Public API ────────────────────────────────────────────────────

pub use coder::Coder;
pub use config::StackConfig;
pub use constructors::{new, new_with_code, with_code, with_message, wrap};
pub use convert::ResultExt;
pub use error::{Error, Node};
pub use group::ErrorGroup;
pub use inspect::{cause, find, get_coder, is, is_code, parse_coder, Chain};
pub use node::{Coded, Plain, Wrapped};
pub use stack::{Frame, StackTrace, Symbol};

/// Convenience Result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_renders_message() {
        let err = new("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn wrap_absent_is_absent() {
        assert!(wrap(None, "ctx").is_none());
    }

    #[test]
    fn wrap_renders_and_unwraps() {
        let base = new("db down");
        let w = wrap(Some(base.clone()), "service init failed").unwrap();
        assert_eq!(w.to_string(), "service init failed: db down");
        assert!(cause(&w).ptr_eq(&base));
    }

    #[test]
    fn coded_scenario() {
        let not_found = Coder::new(10101, 404, "UserNotFound", "");
        let e = new_with_code(not_found, "user jane not found");
        assert_eq!(get_coder(&e).map(|c| c.code()), Some(10101));
        assert!(is_code(&e, not_found));
        assert_eq!(e.to_string(), "UserNotFound: user jane not found");
    }

    #[test]
    fn group_scenario() {
        let mut group = ErrorGroup::with_message("validation failed");
        group.add(new("name is empty"));
        group.add(None);
        group.add(new("age is negative"));
        assert_eq!(group.len(), 2);
        let text = group.to_string();
        assert!(text.contains("validation failed"));
        assert!(text.contains("name is empty"));
        assert!(text.contains("age is negative"));
    }

    #[test]
    fn three_level_chain() {
        let c3 = wrap(wrap(Some(new("root")), "mid"), "outer").unwrap();
        assert_eq!(c3.to_string(), "outer: mid: root");

        let verbose = format!("{:#}", c3);
        let blocks: Vec<&str> = verbose.split("\nCaused by: ").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("outer: mid: root"));
        assert!(blocks[1].starts_with("mid: root"));
        assert!(blocks[2].starts_with("root"));
    }

    #[test]
    fn is_code_property_over_table() {
        for coder in codes::GENERAL.iter() {
            let e = new_with_code(*coder, "x");
            assert!(is_code(&e, *coder));
            for other in codes::GENERAL.iter().filter(|o| o.code() != coder.code()) {
                assert!(!is_code(&e, *other));
            }
        }
    }

    #[test]
    fn verbose_prefix_property() {
        let mut group = ErrorGroup::new();
        group.add(new("a"));
        group.add(new_with_code(codes::ERR_TIMEOUT, "b").wrap("c"));
        let errs = [
            new("x"),
            Error::from(group),
            Error::from_std(std::io::Error::new(std::io::ErrorKind::Other, "io")),
        ];
        for err in errs.iter() {
            assert!(format!("{:#}", err).starts_with(&err.to_string()));
        }
    }

    fn io_failure() -> std::result::Result<(), std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "io"))
    }

    /// Builds one error through every capturing entry point.
    #[inline(never)]
    fn construct_here() -> Vec<(&'static str, Error)> {
        vec![
            ("new", new("plain")),
            ("Error::wrap", new("x").wrap("ctx")),
            ("Error::with_code", new("x").with_code(codes::ERR_TIMEOUT)),
            ("new_with_code", new_with_code(codes::ERR_TIMEOUT, "coded")),
            ("errorf!", errorf!("formatted {}", 1)),
            ("wrap", wrap(Some(new("x")), "free").unwrap()),
            ("with_message", with_message(Some(new("x")), "free").unwrap()),
            ("with_code", with_code(Some(new("x")), codes::ERR_TIMEOUT).unwrap()),
            ("ResultExt::wrap", io_failure().wrap("result ext").unwrap_err()),
            ("ResultExt::wrap_with", io_failure().wrap_with(|| "lazy").unwrap_err()),
            ("ResultExt::with_code", io_failure().with_code(codes::ERR_TIMEOUT).unwrap_err()),
        ]
    }

    #[test]
    fn trace_starts_at_caller() {
        for (via, err) in construct_here() {
            let stack = err.stack().unwrap();
            // Disabled capture or stripped symbols leave nothing to compare.
            let Some(top) = stack.symbols().first().and_then(Symbol::function) else {
                continue;
            };
            assert!(top.contains("construct_here"), "{} trace starts at {}", via, top);
        }
    }

    #[test]
    fn concurrent_construction() {
        let handles: Vec<_> = (0..8)
            .map(|i| std::thread::spawn(move || new_with_code(codes::ERR_TIMEOUT, format!("worker {}", i)).wrap("pool")))
            .collect();
        let mut group = ErrorGroup::new();
        for h in handles {
            group.add(h.join().unwrap());
        }
        assert_eq!(group.len(), 8);
        assert!(Error::from(group).is_code(codes::ERR_TIMEOUT));
    }
}
