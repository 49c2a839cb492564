//! Caller-facing error classes shared by every crate in the workspace.

use std::fmt;

/// How an error should be reported to whoever issued the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was malformed or not understood.
    ClientInput,
    /// The request collides with data that is already stored.
    Conflict,
    /// Anything the caller cannot fix by changing the request.
    Server,
}

impl ErrorClass {
    /// HTTP status an adapter should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ClientInput => 422,
            Self::Conflict => 409,
            Self::Server => 500,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientInput => write!(f, "bad request"),
            Self::Conflict => write!(f, "conflict"),
            Self::Server => write!(f, "server error"),
        }
    }
}
