//! Predefined general-purpose coders.
//!
//! # Code Ranges
//!
//! The `i32` code space is partitioned to prevent collisions:
//!
//! | Range             | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | `0`               | Reserved                                     |
//! | `1`               | [`Coder::UNKNOWN`](crate::Coder::UNKNOWN)    |
//! | `2..=100099`      | serror reserved (future)                     |
//! | `100100..=100199` | General-purpose coders (this module)         |
//! | `100200..=109999` | Framework namespace (reserved for future)    |
//! | `110000+`         | **User application space** (free for all)    |
//!
//! # Usage
//!
//! ```rust
//! use serror::codes::{self, ERR_NOT_FOUND};
//!
//! let err = serror::new_with_code(ERR_NOT_FOUND, "user jane not found");
//! assert_eq!(serror::get_coder(&err).map(|c| c.http_status()), Some(404));
//! assert_eq!(codes::lookup(100102), Some(&ERR_NOT_FOUND));
//! ```
//!
//! The table is a constant; applications declare their own coders as
//! ordinary values and never register them here.

mod general;

pub use general::*;

use crate::Coder;

/// Find a predefined coder by its numeric code.
pub fn lookup(code: i32) -> Option<&'static Coder> {
    GENERAL.iter().find(|c| c.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_distinct() {
        let set: HashSet<i32> = GENERAL.iter().map(Coder::code).collect();
        assert_eq!(set.len(), GENERAL.len());
    }

    #[test]
    fn codes_stay_in_range() {
        for coder in GENERAL.iter() {
            assert!((100100..=100199).contains(&coder.code()), "{:?} out of range", coder);
            assert!(!coder.display().is_empty());
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        assert_eq!(lookup(100104).map(Coder::http_status), Some(401));
        assert_eq!(lookup(ERR_TOO_MANY_REQUESTS.code()), Some(&ERR_TOO_MANY_REQUESTS));
        assert!(lookup(Coder::UNKNOWN.code()).is_none());
        assert!(lookup(42).is_none());
    }

    #[test]
    fn statuses_are_sensible() {
        assert_eq!(ERR_INTERNAL_SERVER.http_status(), 500);
        assert_eq!(ERR_NOT_FOUND.http_status(), 404);
        assert_eq!(ERR_BAD_REQUEST.http_status(), 400);
        assert_eq!(ERR_FORBIDDEN.http_status(), 403);
        assert_eq!(ERR_VALIDATION.http_status(), 422);
        assert_eq!(ERR_TIMEOUT.http_status(), 504);
        assert_eq!(ERR_OPERATION_FAILED.http_status(), 500);
    }
}
