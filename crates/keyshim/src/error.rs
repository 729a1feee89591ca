//! Error types for credential access

use thiserror::Error;

/// Errors raised by credential bindings and shim initialization.
///
/// A missing credential is not an error: lookups report absence as `Ok(None)`.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Write attempted while secret-store access is disabled
    #[error(
        "Cannot store credential for '{service}'/'{account}': secret-store access is disabled"
    )]
    WriteDisabled {
        /// Service the write targeted
        service: String,
        /// Account the write targeted
        account: String,
    },

    /// The native secret store could not be loaded
    #[error("Native secret store unavailable: {message}")]
    Unavailable {
        /// Reason reported by the platform
        message: String,
    },

    /// A call into the native secret store failed
    #[error("Secret store operation failed for '{service}'/'{account}': {message}")]
    Backend {
        /// Service of the failing call
        service: String,
        /// Account of the failing call
        account: String,
        /// Error message from the platform store
        message: String,
    },

    /// A blocking secret-store task did not complete
    #[error("Secret store task failed: {message}")]
    TaskFailed {
        /// Join error message
        message: String,
    },
}

impl CredentialError {
    /// Create a backend error for a (service, account) pair
    #[must_use]
    pub fn backend(
        service: impl Into<String>,
        account: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Backend {
            service: service.into(),
            account: account.into(),
            message: message.into(),
        }
    }

    /// Create an unavailable-store error
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Result type for credential operations
pub type Result<T> = std::result::Result<T, CredentialError>;
