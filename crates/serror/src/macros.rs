//! Formatting constructors and early-return helpers.
//!
//! Every macro expands to a call of the matching free function at the
//! invocation site, so the captured stack starts in the caller's code.

/// [`new`](crate::new) with `format!` arguments.
///
/// ```
/// let err = serror::errorf!("user {} not found", "jane");
/// assert_eq!(err.to_string(), "user jane not found");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::new(::std::format!($($arg)+))
    };
}

/// [`wrap`](crate::wrap) with `format!` arguments. `None` in, `None` out.
///
/// ```
/// let err = serror::wrapf!(Some(serror::new("db down")), "init shard {}", 3);
/// assert_eq!(err.unwrap().to_string(), "init shard 3: db down");
/// ```
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)+) => {
        $crate::wrap($err, ::std::format!($($arg)+))
    };
}

/// [`with_message`](crate::with_message) with `format!` arguments.
#[macro_export]
macro_rules! with_messagef {
    ($err:expr, $($arg:tt)+) => {
        $crate::with_message($err, ::std::format!($($arg)+))
    };
}

/// [`new_with_code`](crate::new_with_code) with `format!` arguments.
///
/// ```
/// use serror::codes::ERR_TIMEOUT;
///
/// let err = serror::errorf_with_code!(ERR_TIMEOUT, "no reply after {}ms", 250);
/// assert_eq!(err.to_string(), "Operation timed out: no reply after 250ms");
/// ```
#[macro_export]
macro_rules! errorf_with_code {
    ($coder:expr, $($arg:tt)+) => {
        $crate::new_with_code($coder, ::std::format!($($arg)+))
    };
}

/// Return early with an error.
///
/// # Forms
///
/// ```ignore
/// bail!("port {} in use", port);            // plain
/// bail!(ERR_VALIDATION => "age {} < 0", a); // coded
/// bail!(err);                               // an existing value
/// ```
///
/// The error is converted with `From`, so functions returning
/// `Result<_, std::io::Error>` work too.
#[macro_export]
macro_rules! bail {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::new(::std::format!($fmt $(, $arg)*)),
        ))
    };
    ($coder:expr => $fmt:literal $(, $arg:expr)* $(,)?) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::new_with_code($coder, ::std::format!($fmt $(, $arg)*)),
        ))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err(::core::convert::From::from($err))
    };
}

/// Return early with an error unless a condition holds.
///
/// ```
/// use serror::codes::ERR_VALIDATION;
///
/// fn check_age(age: i32) -> serror::Result<i32> {
///     serror::ensure!(age >= 0, ERR_VALIDATION => "age {} is negative", age);
///     Ok(age)
/// }
///
/// assert!(check_age(3).is_ok());
/// assert!(serror::is_code(&check_age(-1).unwrap_err(), ERR_VALIDATION));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err(::core::convert::From::from($crate::new(
                ::core::concat!("condition failed: `", ::core::stringify!($cond), "`"),
            )));
        }
    };
    ($cond:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            $crate::bail!($fmt $(, $arg)*);
        }
    };
    ($cond:expr, $coder:expr => $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            $crate::bail!($coder => $fmt $(, $arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::codes::{ERR_BAD_REQUEST, ERR_VALIDATION};
    use crate::{Coder, Error, Node, Result};
    use std::io;

    #[test]
    fn errorf_formats() {
        let name = "jane";
        let err = errorf!("user {name} not found");
        assert_eq!(err.to_string(), "user jane not found");
        assert!(matches!(err.node(), Node::Plain(_)));
    }

    #[test]
    fn wrapf_none_is_none() {
        assert!(wrapf!(None, "ctx {}", 1).is_none());
        let err = wrapf!(Some(errorf!("root")), "step {}", 2).unwrap();
        assert_eq!(err.to_string(), "step 2: root");
    }

    #[test]
    fn with_messagef_formats() {
        let err = with_messagef!(Some(crate::new("root")), "{}-{}", "a", "b").unwrap();
        assert_eq!(err.to_string(), "a-b: root");
    }

    #[test]
    fn errorf_with_code_formats() {
        let err = errorf_with_code!(ERR_BAD_REQUEST, "field {} missing", "id");
        assert_eq!(err.to_string(), "Bad request: field id missing");
        assert!(err.is_code(ERR_BAD_REQUEST));

        let err = errorf_with_code!(None::<Coder>, "x");
        assert_eq!(err.coder(), Some(Coder::UNKNOWN));
    }

    #[test]
    fn bail_plain() {
        fn run(port: u16) -> Result<()> {
            bail!("port {} in use", port);
        }
        assert_eq!(run(8080).unwrap_err().to_string(), "port 8080 in use");
    }

    #[test]
    fn bail_coded() {
        fn run() -> Result<()> {
            bail!(ERR_VALIDATION => "age {} < 0", -1);
        }
        let err = run().unwrap_err();
        assert!(err.is_code(ERR_VALIDATION));
        assert_eq!(err.to_string(), "Validation failed: age -1 < 0");
    }

    #[test]
    fn bail_existing_value() {
        let base = crate::new("base");
        let run = |e: Error| -> Result<()> { bail!(e) };
        assert!(run(base.clone()).unwrap_err().ptr_eq(&base));
    }

    #[test]
    fn bail_into_io_error() {
        fn run() -> io::Result<()> {
            bail!(crate::codes::ERR_NOT_FOUND => "no such user");
        }
        assert_eq!(run().unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn ensure_forms() {
        fn check(n: i32) -> Result<i32> {
            ensure!(n != 0);
            ensure!(n > -10, "{} too small", n);
            ensure!(n < 10, ERR_VALIDATION => "{} too large", n);
            Ok(n)
        }
        assert_eq!(check(5).unwrap(), 5);
        assert_eq!(check(0).unwrap_err().to_string(), "condition failed: `n != 0`");
        assert_eq!(check(-20).unwrap_err().to_string(), "-20 too small");
        assert!(check(20).unwrap_err().is_code(ERR_VALIDATION));
    }
}
