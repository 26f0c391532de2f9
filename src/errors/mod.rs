mod context;

pub use context::{remote_context, with_remote_context};

use thiserror::Error;

/// Result type for paging and polling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by this crate itself.
///
/// Errors returned by a remote collaborator are never wrapped in this type;
/// they reach the caller unchanged. Paged sequences and pollers are generic
/// over the caller's error type `E` and require `E: From<Error>` so that the
/// variants below travel through the same channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The attempt cap or the deadline ran out before the operation completed
    #[error("{operation} did not complete in time ({attempts} attempts)")]
    Timeout { operation: String, attempts: u64 },

    /// The caller's cancellation token fired between iterations
    #[error("{operation} was cancelled")]
    Cancelled { operation: String },

    /// A required input was missing or out of range at construction time
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl Error {
    pub fn timeout(operation: impl Into<String>, attempts: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            attempts,
        }
    }

    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Reject an empty identifier before any remote call is made
pub fn check_not_empty(value: &str, name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}
