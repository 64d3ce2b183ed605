//! Codec error type.

use std::error::Error as StdError;
use std::io;

/// Error produced while decoding a request body or encoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The body could not be decoded into the requested type.
    #[error("decode failed: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// The value could not be serialised into the response body.
    #[error("encode failed: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// A codec operation was requested on an endpoint with no codec configured.
    #[error("no codec configured")]
    Unconfigured,

    /// The underlying reader or writer failed.
    #[error("codec i/o failure: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Wraps a decoding failure.
    #[must_use]
    pub fn decode(cause: impl StdError + Send + Sync + 'static) -> Self {
        Self::Decode(Box::new(cause))
    }

    /// Wraps an encoding failure.
    #[must_use]
    pub fn encode(cause: impl StdError + Send + Sync + 'static) -> Self {
        Self::Encode(Box::new(cause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_display_includes_cause() {
        let cause = serde_json::from_str::<u32>("oops").unwrap_err();
        let err = CodecError::decode(cause);
        assert!(err.to_string().starts_with("decode failed:"));
    }

    #[test]
    fn test_unconfigured_display() {
        assert_eq!(CodecError::Unconfigured.to_string(), "no codec configured");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err = CodecError::from(io_err);
        assert!(err.to_string().contains("pipe closed"));
    }
}
