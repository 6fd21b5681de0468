//! Wrapper for all the errors.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Reading an encoder pin failed.
    Pin(E),
    /// The tracker was used before `init`.
    Uninitialized,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "pin error: {:?}", e),
            Error::Uninitialized => write!(f, "encoder not initialized"),
        }
    }
}
