//! Crate Error Type

use std::borrow::Cow;

use crate::errno::Errno;

/// Errors returned by the fallible operations of this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The kernel rejected a capability query or change.
    #[error("{0}")]
    Os(Cow<'static, Errno>),

    /// A hexadecimal capability set representation couldn't be parsed.
    #[error("invalid hexadecimal capabilities set: {0}")]
    Format(#[from] hex::FromHexError),
}

impl Error {
    /// The raw errno behind a kernel rejection, if this is one.
    pub fn errno(&self) -> Option<Errno> {
        match self {
            Self::Os(errno) => Some(**errno),
            Self::Format(_) => None,
        }
    }
}

impl From<Cow<'static, Errno>> for Error {
    fn from(errno: Cow<'static, Errno>) -> Self {
        Self::Os(errno)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
