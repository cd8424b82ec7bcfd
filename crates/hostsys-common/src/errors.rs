//! Error types for host system operations.
//!
//! Every operation reports failure through [`SystemError`]. The variants map
//! one-to-one onto the error kinds the calling environment understands, so a
//! host can translate them without inspecting message text:
//!
//! ```rust
//! use hostsys_common::{ErrorKind, SystemError, SystemResult};
//!
//! fn wait(pid: i64) -> SystemResult<i32> {
//!     if pid <= 0 {
//!         return Err(SystemError::invalid_argument(
//!             "system:wait",
//!             format!("process identifier must be positive, got {}", pid),
//!         ));
//!     }
//!     Ok(0)
//! }
//!
//! let err = wait(0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidArgument);
//! ```

use std::fmt;
use thiserror::Error;

/// Result type alias for host system operations.
pub type SystemResult<T> = std::result::Result<T, SystemError>;

/// Main error type for host system operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SystemError {
    /// Resource exhaustion while building a string, vector or buffer.
    #[error("out of memory while {context}")]
    Allocation { context: String },

    /// A caller-supplied value has the wrong shape.
    #[error("{operation}: {message}")]
    Type { operation: String, message: String },

    /// A value is well-typed but semantically illegal.
    #[error("{operation}: {message}")]
    InvalidArgument { operation: String, message: String },

    /// An OS query (working directory read or change) failed.
    #[error("{message}: {reason}")]
    OsQuery {
        message: String,
        reason: String,
        errno: Option<i32>,
    },

    /// An OS operation (spawn, wait) failed or returned an unrecognized result.
    #[error("{message}: {reason}")]
    OsOperation {
        message: String,
        reason: String,
        errno: Option<i32>,
    },

    /// The operation has no implementation on the current platform.
    #[error("{operation} is not implemented on this platform")]
    Unsupported { operation: String },
}

/// Kind tag of a [`SystemError`], named the way the calling environment names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Allocation,
    Type,
    InvalidArgument,
    OsQuery,
    OsOperation,
    Unsupported,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Allocation => "AllocationError",
            ErrorKind::Type => "TypeError",
            ErrorKind::InvalidArgument => "InvalidArgumentError",
            ErrorKind::OsQuery => "OSQueryError",
            ErrorKind::OsOperation => "OSOperationError",
            ErrorKind::Unsupported => "UnsupportedError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SystemError {
    pub fn allocation(context: impl Into<String>) -> Self {
        Self::Allocation {
            context: context.into(),
        }
    }

    pub fn type_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Type {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// OS query failure carrying the text and errno of `err`.
    pub fn os_query(message: impl Into<String>, err: &std::io::Error) -> Self {
        Self::OsQuery {
            message: message.into(),
            reason: err.to_string(),
            errno: err.raw_os_error(),
        }
    }

    /// OS query failure with no underlying OS error.
    pub fn os_query_reason(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OsQuery {
            message: message.into(),
            reason: reason.into(),
            errno: None,
        }
    }

    /// OS operation failure carrying the text and errno of `err`.
    pub fn os_operation(message: impl Into<String>, err: &std::io::Error) -> Self {
        Self::OsOperation {
            message: message.into(),
            reason: err.to_string(),
            errno: err.raw_os_error(),
        }
    }

    /// OS operation failure with no underlying OS error.
    pub fn os_operation_reason(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OsOperation {
            message: message.into(),
            reason: reason.into(),
            errno: None,
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SystemError::Allocation { .. } => ErrorKind::Allocation,
            SystemError::Type { .. } => ErrorKind::Type,
            SystemError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            SystemError::OsQuery { .. } => ErrorKind::OsQuery,
            SystemError::OsOperation { .. } => ErrorKind::OsOperation,
            SystemError::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    /// Raw OS error number, when the failure came from the OS.
    pub fn errno(&self) -> Option<i32> {
        match self {
            SystemError::OsQuery { errno, .. } | SystemError::OsOperation { errno, .. } => *errno,
            _ => None,
        }
    }
}
