//! Extension Error Types
//!
//! Every failure is reported to the host as an integer status; 0 means
//! success and is implied by `Ok`. The parameter and not-supported codes
//! follow the host ABI's well-known values; host allocator statuses pass
//! through verbatim.

use thiserror::Error;

/// Status returned for a successful operation.
pub const STATUS_SUCCESS: i32 = 0;

/// A required host callback failed to resolve during initialization.
pub const STATUS_INVALID_PARAMETER: i32 = 87;

/// An invoke entry point was called before its precision was initialized.
pub const STATUS_NOT_INITIALIZED: i32 = 21;

/// The requested selector is not exported by this extension.
pub const STATUS_NOT_SUPPORTED: i32 = 50;

/// Errors an extension entry point can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtensionError {
    /// A required host callback failed to resolve.
    #[error("required host callback failed to resolve")]
    InvalidParameter,

    /// Invoke was called before a successful initialization.
    #[error("extension invoked before initialization")]
    NotInitialized,

    /// The selector names a function this extension does not export.
    #[error("the function specified is not supported")]
    NotSupported,

    /// The host's allocation callback failed; the status is forwarded
    /// verbatim. Always non-zero.
    #[error("host allocation callback failed with status {0}")]
    Host(i32),
}

impl ExtensionError {
    /// The integer status reported to the host for this error.
    pub fn status_code(&self) -> i32 {
        match self {
            ExtensionError::InvalidParameter => STATUS_INVALID_PARAMETER,
            ExtensionError::NotInitialized => STATUS_NOT_INITIALIZED,
            ExtensionError::NotSupported => STATUS_NOT_SUPPORTED,
            ExtensionError::Host(status) => *status,
        }
    }
}

/// Result type for extension operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;
