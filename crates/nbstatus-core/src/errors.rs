//! Error types for nbstatus-core.

/// Why a candidate document name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name must have 1 or more characters")]
    Empty,

    #[error("name contains forbidden character '{0}'")]
    ForbiddenChar(char),
}

/// Errors from the event-loop driver and its input decoding.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("invalid input line: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input channel closed")]
    ChannelClosed,
}

impl DriverError {
    /// Error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            DriverError::Decode(_) => "DRIVER_DECODE_ERROR",
            DriverError::Io(_) => "DRIVER_IO_ERROR",
            DriverError::ChannelClosed => "DRIVER_CHANNEL_CLOSED",
        }
    }
}
