//! # Status codes
//!
//! The error vocabulary shared across this layer, plus the flattening into
//! the raw integer ABI some callers still speak: `0` for success, the
//! negated code on failure.

use thiserror::Error;

/// Result alias for fallible architecture-layer operations.
pub type ArchResult<T> = Result<T, ArchError>;

/// Failure codes of the architecture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArchError {
    /// Allocation of backing memory failed.
    #[error("out of memory")]
    NoMemory,
    /// The operation is not supported on this CPU or configuration.
    #[error("not supported")]
    NotSupported,
    /// An argument was malformed (non-canonical address, bad mask, ...).
    #[error("invalid arguments")]
    InvalidArgs,
    /// The referenced entity does not exist.
    #[error("not found")]
    NotFound,
    /// The subsystem is not in a state that permits the operation.
    #[error("bad state")]
    BadState,
}

impl ArchError {
    /// The stable numeric code of this error.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::NoMemory => 1,
            Self::NotSupported => 2,
            Self::InvalidArgs => 3,
            Self::NotFound => 4,
            Self::BadState => 9,
        }
    }
}

/// Flatten a result into the raw status ABI, discarding any payload.
pub fn into_status<T>(result: ArchResult<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => -e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ArchError::NoMemory.code(), 1);
        assert_eq!(ArchError::NotSupported.code(), 2);
        assert_eq!(ArchError::InvalidArgs.code(), 3);
        assert_eq!(ArchError::NotFound.code(), 4);
        assert_eq!(ArchError::BadState.code(), 9);
    }

    #[test]
    fn status_flattening() {
        assert_eq!(into_status(Ok(42)), 0);
        assert_eq!(into_status::<()>(Err(ArchError::NoMemory)), -1);
        assert_eq!(into_status::<()>(Err(ArchError::BadState)), -9);
    }

    #[test]
    fn errors_display() {
        assert_eq!(ArchError::NotSupported.to_string(), "not supported");
    }
}
