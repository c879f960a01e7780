//! General-purpose coders (100100–100199).
//!
//! Cover the categories almost every service needs. Labels are short and
//! safe to show to API clients.

use crate::Coder;

// ── Server side ───────────────────────────────────────────────────

pub const ERR_INTERNAL_SERVER:   Coder = Coder::new(100101, 500, "Internal server error", "");
pub const ERR_OPERATION_FAILED:  Coder = Coder::new(100109, 500, "Operation failed", "");
pub const ERR_TIMEOUT:           Coder = Coder::new(100107, 504, "Operation timed out", "");

// ── Client side ───────────────────────────────────────────────────

pub const ERR_NOT_FOUND:         Coder = Coder::new(100102, 404, "Not found", "");
pub const ERR_BAD_REQUEST:       Coder = Coder::new(100103, 400, "Bad request", "");
pub const ERR_VALIDATION:        Coder = Coder::new(100106, 422, "Validation failed", "");
pub const ERR_TOO_MANY_REQUESTS: Coder = Coder::new(100108, 429, "Too many requests", "");

// ── Access control ────────────────────────────────────────────────

pub const ERR_UNAUTHORIZED:      Coder = Coder::new(100104, 401, "Unauthorized", "");
pub const ERR_FORBIDDEN:         Coder = Coder::new(100105, 403, "Forbidden", "");

/// Every coder above, ordered by code.
pub static GENERAL: [Coder; 9] = [
    ERR_INTERNAL_SERVER,
    ERR_NOT_FOUND,
    ERR_BAD_REQUEST,
    ERR_UNAUTHORIZED,
    ERR_FORBIDDEN,
    ERR_VALIDATION,
    ERR_TIMEOUT,
    ERR_TOO_MANY_REQUESTS,
    ERR_OPERATION_FAILED,
];
