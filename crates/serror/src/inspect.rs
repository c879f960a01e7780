//! Chain inspection.
//!
//! Every walk here is the same pre-order depth-first traversal over
//! [`Error::causes`]: the node itself, then its single cause for Wrapped
//! and Coded nodes, or each member in insertion order for groups. Plain
//! and foreign errors end a branch.
//!
//! ```text
//! outer (Wrapped) ─► api (Coded: ERR_NOT_FOUND) ─► group ─┬─► a (Coded: ERR_TIMEOUT)
//!                                                        └─► b (Plain)
//! walk: outer, api, group, a, b      get_coder → ERR_NOT_FOUND
//! ```
//!
//! Chains built by this crate are acyclic, so every walk terminates.

use std::error::Error as StdError;

use crate::{Coder, Error, Node};

/// Pre-order iterator over an error and everything beneath it.
///
/// Returned by [`Error::chain`].
pub struct Chain<'a> {
    pending: Vec<&'a Error>,
}

impl<'a> Chain<'a> {
    fn new(head: &'a Error) -> Self {
        Self { pending: vec![head] }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let err = self.pending.pop()?;
        self.pending.extend(err.causes().iter().rev());
        Some(err)
    }
}

impl Error {
    /// Walk this error and all its causes, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Follow single causes down to the root. See [`cause`].
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Some(next) = err.next_cause() {
            err = next;
        }
        err
    }

    /// The coder nearest the head of the chain. See [`get_coder`].
    pub fn coder(&self) -> Option<Coder> {
        self.chain().find_map(Error::own_coder)
    }

    /// True if any coder in the chain has the same code. See [`is_code`].
    pub fn is_code(&self, coder: Coder) -> bool {
        self.chain()
            .filter_map(Error::own_coder)
            .any(|c| c.code() == coder.code())
    }

    /// Chain membership. See [`is`].
    pub fn is(&self, target: &Error) -> bool {
        self.chain().any(|err| matches_target(err, target))
    }

    /// Typed extraction. See [`find`].
    pub fn find<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        self.chain().find_map(|err| match err.node() {
            Node::Foreign(foreign) => find_in_sources(foreign),
            _ => err.as_dyn().downcast_ref::<T>(),
        })
    }
}

fn matches_target(err: &Error, target: &Error) -> bool {
    if err.ptr_eq(target) {
        return true;
    }
    match (err.node(), target.node()) {
        (Node::Plain(a), Node::Plain(b)) => a.message() == b.message(),
        _ => false,
    }
}

fn find_in_sources<'a, T>(head: &'a (dyn StdError + Send + Sync + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    let mut current: Option<&'a (dyn StdError + 'static)> = Some(head);
    while let Some(err) = current {
        if let Some(found) = err.downcast_ref::<T>() {
            return Some(found);
        }
        current = err.source();
    }
    None
}

/// Root cause: unwrap one step at a time until nothing is left.
///
/// Returns `err` itself when it has no cause. Groups and foreign errors
/// are roots; use [`Error::causes`] or [`Error::chain`] to look inside
/// a group.
///
/// ```
/// let base = serror::new("db down");
/// let err = base.clone().wrap("service init failed");
/// assert!(serror::cause(&err).ptr_eq(&base));
/// ```
pub fn cause(err: &Error) -> &Error {
    err.root_cause()
}

/// First coder met walking outward to inward.
///
/// An outer category wins over an inner one: coding an already coded
/// error re-categorizes it.
///
/// ```
/// use serror::codes::{ERR_NOT_FOUND, ERR_TIMEOUT};
///
/// let err = serror::new_with_code(ERR_TIMEOUT, "upstream slow").with_code(ERR_NOT_FOUND);
/// assert_eq!(serror::get_coder(&err), Some(ERR_NOT_FOUND));
/// ```
pub fn get_coder(err: &Error) -> Option<Coder> {
    err.coder()
}

/// Like [`get_coder`], falling back to [`Coder::UNKNOWN`].
pub fn parse_coder(err: &Error) -> Coder {
    err.coder().unwrap_or(Coder::UNKNOWN)
}

/// True if any coder in the chain shares `coder`'s code.
pub fn is_code(err: &Error, coder: Coder) -> bool {
    err.is_code(coder)
}

/// True if `target` is in `err`'s chain.
///
/// A node matches when it shares `target`'s underlying value, or when
/// both are plain errors with identical messages.
pub fn is(err: &Error, target: &Error) -> bool {
    err.is(target)
}

/// First value of type `T` in the chain.
///
/// `T` may be a node type ([`Plain`](crate::Plain), [`Wrapped`](crate::Wrapped),
/// [`Coded`](crate::Coded), [`ErrorGroup`](crate::ErrorGroup)) or any foreign
/// error type, which is also looked for along the foreign error's own
/// `source()` chain.
///
/// ```
/// use serror::Coded;
///
/// let err = serror::new_with_code(serror::codes::ERR_FORBIDDEN, "no access").wrap("load page");
/// let coded = serror::find::<Coded>(&err).unwrap();
/// assert_eq!(coded.coder().http_status(), 403);
/// ```
pub fn find<T>(err: &Error) -> Option<&T>
where
    T: StdError + 'static,
{
    err.find::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{ERR_NOT_FOUND, ERR_TIMEOUT, ERR_VALIDATION};
    use crate::{new, new_with_code, with_code, wrap, Coded, ErrorGroup, Plain, Wrapped};
    use std::fmt;
    use std::io;

    fn messages(err: &Error) -> Vec<String> {
        err.chain()
            .filter_map(|e| match e.node() {
                Node::Plain(p) => Some(p.message().to_string()),
                Node::Wrapped(w) => Some(w.message().to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn cause_of_plain_is_itself() {
        let err = new("alone");
        assert!(cause(&err).ptr_eq(&err));
    }

    #[test]
    fn cause_reaches_root() {
        let base = new("root");
        let err = wrap(with_code(wrap(Some(base.clone()), "mid"), ERR_TIMEOUT), "outer").unwrap();
        let root = cause(&err);
        assert!(root.ptr_eq(&base));
        assert!(root.next_cause().is_none());
    }

    #[test]
    fn cause_terminates_on_deep_chain() {
        let mut err = new("root");
        for i in 0..200 {
            err = err.wrap(format!("layer {}", i));
        }
        assert_eq!(cause(&err).to_string(), "root");
        assert_eq!(err.chain().count(), 201);
    }

    #[test]
    fn chain_is_preorder() {
        let mut group = ErrorGroup::new();
        group.add(new("a").wrap("wa"));
        group.add(new("b"));
        let err = Error::from(group).wrap("outer");
        assert_eq!(messages(&err), ["outer", "wa", "a", "b"]);
    }

    #[test]
    fn get_coder_outer_wins() {
        let err = new_with_code(ERR_TIMEOUT, "slow").wrap("ctx").with_code(ERR_NOT_FOUND);
        assert_eq!(get_coder(&err), Some(ERR_NOT_FOUND));
        assert!(is_code(&err, ERR_NOT_FOUND));
        assert!(is_code(&err, ERR_TIMEOUT));
        assert!(!is_code(&err, ERR_VALIDATION));
    }

    #[test]
    fn get_coder_absent() {
        let err = new("plain").wrap("still plain");
        assert!(get_coder(&err).is_none());
        assert_eq!(parse_coder(&err), Coder::UNKNOWN);
    }

    #[test]
    fn get_coder_inside_group() {
        let mut group = ErrorGroup::new();
        group.add(new("plain"));
        group.add(new_with_code(ERR_VALIDATION, "bad"));
        group.add(new_with_code(ERR_TIMEOUT, "slow"));
        let err = Error::from(group);
        assert_eq!(get_coder(&err), Some(ERR_VALIDATION));
        assert!(is_code(&err, ERR_TIMEOUT));
    }

    #[test]
    fn is_code_compares_codes() {
        let notfound = Coder::new(10101, 404, "UserNotFound", "");
        let lookalike = Coder::new(10101, 500, "Other", "");
        let different = Coder::new(10102, 404, "UserNotFound", "");
        let err = new_with_code(notfound, "x");
        assert!(is_code(&err, lookalike));
        assert!(!is_code(&err, different));
    }

    #[test]
    fn is_finds_shared_node() {
        let base = new("db down");
        let err = base.clone().wrap("init").with_code(ERR_TIMEOUT);
        assert!(is(&err, &base));
        assert!(!is(&err, &new("unrelated")));
    }

    #[test]
    fn is_plain_by_message() {
        let err = new("EOF").wrap("read header");
        assert!(is(&err, &new("EOF")));
        assert!(!is(&err, &new("eof")));
    }

    #[test]
    fn is_wrapped_needs_identity() {
        let err = new("EOF").wrap("read header");
        assert!(!is(&err, &new("EOF").wrap("read header")));
        assert!(is(&err, &err.clone()));
    }

    #[test]
    fn is_searches_group_members() {
        let target = new("disk full");
        let mut group = ErrorGroup::new();
        group.add(new("net down"));
        group.add(target.clone().wrap("write log"));
        let err = Error::from(group);
        assert!(is(&err, &target));
    }

    #[test]
    fn find_node_variants() {
        let err = new_with_code(ERR_NOT_FOUND, "user jane not found").wrap("lookup");
        assert_eq!(find::<Wrapped>(&err).map(Wrapped::message), Some("lookup"));
        assert_eq!(find::<Coded>(&err).map(Coded::coder), Some(ERR_NOT_FOUND));
        assert_eq!(find::<Plain>(&err).map(Plain::message), Some("user jane not found"));
        assert!(find::<ErrorGroup>(&err).is_none());
    }

    #[test]
    fn find_foreign_and_its_sources() {
        #[derive(Debug)]
        struct Config(io::Error);
        impl fmt::Display for Config {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("bad config")
            }
        }
        impl StdError for Config {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let err = Error::from_std(Config(io::Error::new(io::ErrorKind::NotFound, "missing")))
            .wrap("startup");
        assert!(find::<Config>(&err).is_some());
        assert_eq!(find::<io::Error>(&err).map(io::Error::kind), Some(io::ErrorKind::NotFound));
        assert!(find::<Coded>(&err).is_none());
    }

    #[test]
    fn foreign_is_terminal() {
        let err = Error::from_std(io::Error::new(io::ErrorKind::Other, "x"));
        assert!(cause(&err).ptr_eq(&err));
        assert_eq!(err.chain().count(), 1);
        assert!(get_coder(&err).is_none());
    }
}
