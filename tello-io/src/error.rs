//! Error types for TelloIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Actuator error types
///
/// Every variant means the commanded primitive did not complete; callers
/// must treat the vehicle as not having moved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Command issued before `connect()` or after `disconnect()`
    #[error("Vehicle not connected")]
    NotConnected,

    /// Motion command issued while the vehicle is on the ground
    #[error("Vehicle is not airborne")]
    Grounded,

    /// Argument outside the range the SDK accepts
    #[error("{command} argument {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// SDK command name
        command: &'static str,
        /// Rejected value
        value: u32,
        /// Smallest accepted value
        min: u32,
        /// Largest accepted value
        max: u32,
    },

    /// Vehicle answered the command with an error
    #[error("Command rejected: {0}")]
    Rejected(String),

    /// No reply within the response timeout
    #[error("Communication timeout after {0} ms")]
    Timeout(u64),

    /// Reply that could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// I/O error (stored as text so the error stays cloneable)
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration names a device type that does not exist
    #[error("Unknown device type: {0}")]
    UnknownDevice(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Socket errors become `Io`; reply timeouts are reported by the transport,
/// which knows the configured timeout.
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
