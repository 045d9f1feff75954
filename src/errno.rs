//! Boxed errno Values
//!
//! Turns raw errno codes returned by the kernel into error values.
//!
//! # Design
//! - The most common codes map to process-wide `static` values, so repeated
//!   failures of the same kind hand out the very same value
//! - Every other code gets a fresh `Errno` carrying the raw number
//! - Code 0 means success and maps to no error at all

use std::borrow::Cow;
use std::fmt;

/// A raw errno code reported by the kernel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Errno(i32);

impl Errno {
    /// Operation not permitted.
    pub const EPERM: Self = Self(libc::EPERM);
    /// No such file or directory.
    pub const ENOENT: Self = Self(libc::ENOENT);
    /// No such process.
    pub const ESRCH: Self = Self(libc::ESRCH);
    /// Bad file descriptor.
    pub const EBADF: Self = Self(libc::EBADF);
    /// Resource temporarily unavailable.
    pub const EAGAIN: Self = Self(libc::EAGAIN);
    /// Cannot allocate memory.
    pub const ENOMEM: Self = Self(libc::ENOMEM);
    /// Bad address.
    pub const EFAULT: Self = Self(libc::EFAULT);
    /// Invalid argument.
    pub const EINVAL: Self = Self(libc::EINVAL);
    /// Socket operation on non-socket.
    pub const ENOTSOCK: Self = Self(libc::ENOTSOCK);

    /// Wrap a raw errno code.
    #[inline]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the raw errno code.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// The errno left behind by the last failed libc call on this thread.
    pub fn last() -> Self {
        Self(
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or_default(),
        )
    }

    /// Short descriptions, also for a few codes outside the shared statics;
    /// everything not listed renders as `errno <N>`.
    fn description(self) -> Option<&'static str> {
        Some(match self.0 {
            libc::EPERM => "operation not permitted",
            libc::ENOENT => "no such file or directory",
            libc::ESRCH => "no such process",
            libc::EBADF => "bad file descriptor",
            libc::EAGAIN => "resource temporarily unavailable",
            libc::ENOMEM => "cannot allocate memory",
            libc::EFAULT => "bad address",
            libc::EINVAL => "invalid argument",
            libc::ENOTSOCK => "socket operation on non-socket",
            _ => return None,
        })
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "errno {}", self.0),
        }
    }
}

impl fmt::Debug for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Errno({})", self.0)
    }
}

impl std::error::Error for Errno {}

impl From<Errno> for std::io::Error {
    fn from(errno: Errno) -> Self {
        std::io::Error::from_raw_os_error(errno.0)
    }
}

static EBADF: Errno = Errno::EBADF;
static ENOTSOCK: Errno = Errno::ENOTSOCK;
static EAGAIN: Errno = Errno::EAGAIN;
static EINVAL: Errno = Errno::EINVAL;
static ENOENT: Errno = Errno::ENOENT;

/// Map a raw errno code to an error value.
///
/// # Returns
/// * `None` - code 0, success
/// * `Some(Cow::Borrowed(_))` - one of the shared statics for `EBADF`,
///   `ENOTSOCK`, `EAGAIN`, `EINVAL` and `ENOENT`
/// * `Some(Cow::Owned(_))` - any other code
pub fn error(code: i32) -> Option<Cow<'static, Errno>> {
    let boxed = match code {
        0 => return None,
        libc::EBADF => &EBADF,
        libc::ENOTSOCK => &ENOTSOCK,
        libc::EAGAIN => &EAGAIN,
        libc::EINVAL => &EINVAL,
        libc::ENOENT => &ENOENT,
        _ => return Some(Cow::Owned(Errno(code))),
    };
    Some(Cow::Borrowed(boxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_boxed(code: i32, expected: &'static Errno) {
        match error(code) {
            Some(Cow::Borrowed(errno)) => assert!(core::ptr::eq(errno, expected)),
            other => panic!("errno {} not boxed: {:?}", code, other),
        }
    }

    #[test]
    fn test_common_codes_are_boxed() {
        assert_boxed(libc::EBADF, &EBADF);
        assert_boxed(libc::ENOTSOCK, &ENOTSOCK);
        assert_boxed(libc::EAGAIN, &EAGAIN);
        assert_boxed(libc::EINVAL, &EINVAL);
        assert_boxed(libc::ENOENT, &ENOENT);
    }

    #[test]
    fn test_zero_is_success() {
        assert!(error(0).is_none());
    }

    #[test]
    fn test_other_codes() {
        let err = error(42000).expect("non-zero code is an error");
        assert!(matches!(err, Cow::Owned(_)));
        assert_eq!(err.raw(), 42000);
        assert_eq!(err.to_string(), "errno 42000");

        let eperm = error(libc::EPERM).expect("non-zero code is an error");
        assert_eq!(*eperm, Errno::EPERM);
        assert_eq!(eperm.to_string(), "operation not permitted");
    }

    #[test]
    fn test_into_io_error() {
        let io: std::io::Error = Errno::EINVAL.into();
        assert_eq!(io.raw_os_error(), Some(libc::EINVAL));
    }
}
