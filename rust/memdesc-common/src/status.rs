//! Status codes shared with the transfer-engine API surface.
//!
//! Most operations in this workspace report failures through
//! [`Result`](crate::Result). The few that must hand back a plain code
//! (list serialization) use [`Status`], and [`Status::from`] maps an
//! [`Error`] onto this vocabulary.

use std::fmt;

use crate::error::{Error, ErrorKind};

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    InProgress = 1,
    Success = 0,
    ErrNotPosted = -1,
    ErrInvalidParam = -2,
    ErrBackend = -3,
    ErrNotFound = -4,
    ErrMismatch = -5,
    ErrNotAllowed = -6,
    ErrRepost = -7,
    ErrNotSupported = -8,
    ErrUnknown = -9,
}

impl Status {
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Success | Status::InProgress)
    }

    #[inline]
    pub fn is_err(self) -> bool {
        !self.is_ok()
    }

    /// Numeric code as exchanged with the C-compatible API.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::InProgress => "IN_PROG",
            Status::Success => "SUCCESS",
            Status::ErrNotPosted => "ERR_NOT_POSTED",
            Status::ErrInvalidParam => "ERR_INVALID_PARAM",
            Status::ErrBackend => "ERR_BACKEND",
            Status::ErrNotFound => "ERR_NOT_FOUND",
            Status::ErrMismatch => "ERR_MISMATCH",
            Status::ErrNotAllowed => "ERR_NOT_ALLOWED",
            Status::ErrRepost => "ERR_REPOST",
            Status::ErrNotSupported => "ERR_NOT_SUPPORTED",
            Status::ErrUnknown => "ERR_UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ErrorKind> for Status {
    fn from(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument { .. } | ErrorKind::IndexOutOfRange { .. } => {
                Status::ErrInvalidParam
            }
            ErrorKind::InvalidOperation { .. } => Status::ErrNotAllowed,
            ErrorKind::InvalidFormat { .. } => Status::ErrMismatch,
            ErrorKind::CapacityExceeded { .. } | ErrorKind::Io { .. } => Status::ErrBackend,
        }
    }
}

impl From<&Error> for Status {
    fn from(e: &Error) -> Self {
        Status::from(e.kind())
    }
}

impl<T> From<&crate::Result<T>> for Status {
    fn from(result: &crate::Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => e.into(),
        }
    }
}
