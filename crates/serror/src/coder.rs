/// A categorization attached to an error: numeric code, suggested HTTP
/// status, a short human label and an optional reference link.
///
/// Coders are plain values, usually declared as constants by the
/// application. Nothing is registered globally and no uniqueness check is
/// made; picking non-colliding codes is the caller's job (see
/// [`codes`](crate::codes) for the reserved ranges).
///
/// Two coders are equal when their `code` is equal; the other fields are
/// descriptive only.
///
/// ```
/// use serror::Coder;
///
/// const ERR_USER_NOT_FOUND: Coder = Coder::new(110001, 404, "UserNotFound", "");
/// assert_eq!(ERR_USER_NOT_FOUND.http_status(), 404);
/// ```
#[derive(Clone, Copy)]
pub struct Coder {
    code: i32,
    http_status: u16,
    display: &'static str,
    reference: &'static str,
}

impl Coder {
    /// Construct a new coder.
    ///
    /// Labels are `&'static str` so a coder stays `Copy` and can be built
    /// in a `const`. Categories only known at runtime (loaded from a
    /// config file, say) are meant to be built once at startup; leak their
    /// labels then and keep the coders for the life of the process:
    ///
    /// ```
    /// use serror::Coder;
    ///
    /// let label: String = format!("{}Unavailable", "Billing");
    /// let display: &'static str = Box::leak(label.into_boxed_str());
    /// let billing = Coder::new(120503, 503, display, "");
    ///
    /// let err = serror::new_with_code(billing, "ledger offline");
    /// assert_eq!(err.to_string(), "BillingUnavailable: ledger offline");
    /// assert_eq!(serror::get_coder(&err).map(|c| c.code()), Some(120503));
    /// ```
    ///
    /// Leaking per error instead grows memory without bound.
    pub const fn new(
        code: i32,
        http_status: u16,
        display: &'static str,
        reference: &'static str,
    ) -> Self {
        Self { code, http_status, display, reference }
    }

    /// Stands in whenever a coded error is built without a coder.
    pub const UNKNOWN: Coder = Coder::new(1, 500, "An internal server error occurred", "");

    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Suggested transport status for this category.
    #[inline]
    pub const fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Short human label, distinct from the error message. May be empty,
    /// in which case the coder adds nothing to the rendered message.
    #[inline]
    pub const fn display(&self) -> &'static str {
        self.display
    }

    /// Documentation link for this category. May be empty.
    #[inline]
    pub const fn reference(&self) -> &'static str {
        self.reference
    }

    #[inline]
    pub const fn is_unknown(&self) -> bool {
        self.code == Coder::UNKNOWN.code
    }
}

impl PartialEq for Coder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Coder {}

impl core::hash::Hash for Coder {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Debug for Coder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({}, http {})", self.display, self.code, self.http_status)
    }
}

impl core::fmt::Display for Coder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.display.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}", self.display)
        }
    }
}
