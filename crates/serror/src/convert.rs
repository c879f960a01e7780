use std::error::Error as StdError;
use std::io;

use crate::{Coder, Error, Result, StackTrace};

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for Error {
    /// An `io::Error` that was built from one of ours is unwrapped back
    /// to the original value; anything else becomes a foreign node.
    fn from(err: io::Error) -> Self {
        if let Some(ours) = err.get_ref().and_then(|inner| inner.downcast_ref::<Error>()) {
            return ours.clone();
        }
        Error::from_std(err)
    }
}

// ── Into<io::Error> ───────────────────────────────────────────────

/// Maps the suggested HTTP status of a coder onto the closest io kind.
fn io_kind(coder: Option<Coder>) -> io::ErrorKind {
    match coder.map(|c| c.http_status()) {
        Some(404) => io::ErrorKind::NotFound,
        Some(401) | Some(403) => io::ErrorKind::PermissionDenied,
        Some(400) | Some(422) => io::ErrorKind::InvalidInput,
        Some(408) | Some(504) => io::ErrorKind::TimedOut,
        _ => io::ErrorKind::Other,
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io_kind(err.coder()), err)
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for Error {
    fn from(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Error::from_boxed(err)
    }
}

// ── ResultExt: context annotation on Results ──────────────────────

/// Extension trait for annotating any `Result` during propagation.
///
/// The error side is brought in with [`Error::from_std`] and then wrapped
/// or coded; the new node's stack starts at the call site.
///
/// ```
/// use serror::ResultExt;
/// use serror::codes::ERR_NOT_FOUND;
///
/// fn load() -> serror::Result<String> {
///     let text = std::fs::read_to_string("/nonexistent/config.toml")
///         .wrap("reading config")
///         .with_code(ERR_NOT_FOUND)?;
///     Ok(text)
/// }
///
/// let err = load().unwrap_err();
/// assert!(err.to_string().contains("reading config"));
/// assert!(serror::is_code(&err, ERR_NOT_FOUND));
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with a context message.
    fn wrap(self, text: &str) -> Result<T>;

    /// Like [`wrap`](ResultExt::wrap), building the message only on error.
    fn wrap_with<S, F>(self, f: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S;

    /// Attach a coder to the error; `None` becomes [`Coder::UNKNOWN`].
    fn with_code(self, coder: impl Into<Option<Coder>>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[inline(never)]
    fn wrap(self, text: &str) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrapped(Error::from_std(e), text.to_string(), StackTrace::capture(1))),
        }
    }

    #[inline(never)]
    fn wrap_with<S, F>(self, f: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrapped(Error::from_std(e), f().into(), StackTrace::capture(1))),
        }
    }

    #[inline(never)]
    fn with_code(self, coder: impl Into<Option<Coder>>) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => {
                let coder = coder.into().unwrap_or(Coder::UNKNOWN);
                Err(Error::coded(Error::from_std(e), coder, StackTrace::capture(1)))
            }
        }
    }
}
