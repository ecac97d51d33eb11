//! Error types for compression operations.

use thiserror::Error;

/// Result type alias for compression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Compression error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data is corrupted or invalid.
    #[error("corrupted data: {message}")]
    CorruptedData {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Unexpected end of input stream.
    #[error("unexpected EOF after {bytes_read} bytes")]
    UnexpectedEof { bytes_read: usize },
}

impl Error {
    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::CorruptedData {
            message: message.into(),
            source: None,
        }
    }

    /// Create a corrupted data error with offset context.
    pub fn corrupted_at(message: impl Into<String>, offset: usize) -> Self {
        Error::CorruptedData {
            message: format!("{} at offset {}", message.into(), offset),
            source: None,
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bytes_read: usize) -> Self {
        Error::UnexpectedEof { bytes_read }
    }

    /// Check if error is recoverable (can retry with a larger buffer).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::BufferTooSmall { .. })
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::CorruptedData { .. } => "corrupted_data",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::UnexpectedEof { .. } => "unexpected_eof",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_display() {
        let err = Error::corrupted("bad header");
        assert_eq!(err.to_string(), "corrupted data: bad header");
        assert_eq!(err.category(), "corrupted_data");
    }

    #[test]
    fn test_corrupted_at_includes_offset() {
        let err = Error::corrupted_at("table truncated", 17);
        assert!(err.to_string().contains("at offset 17"));
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::buffer_too_small(10, 5).is_recoverable());
        assert!(!Error::corrupted("nope").is_recoverable());
        assert!(!Error::unexpected_eof(3).is_recoverable());
    }
}
