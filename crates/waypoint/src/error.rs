//! Engine error types.
//!
//! Two families: [`BuildError`] for mapping problems detected while an
//! endpoint is compiled, and [`EndpointError`] for failures while a request
//! is processed. Build errors are accumulated on the processor and the
//! first one is returned from every invocation; they are never panics.

use crate::segment::SegmentError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use waypoint_codec::CodecError;

/// The two kinds of build-time mapping error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// A handler parameter type is outside the supported set.
    UnsupportedType,
    /// The handler shape cannot be mapped onto the endpoint: arity
    /// mismatches, duplicate singleton groups, missing codecs.
    InvalidMapping,
}

impl fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType => write!(f, "unsupported type"),
            Self::InvalidMapping => write!(f, "invalid mapping"),
        }
    }
}

/// A mapping error produced while an endpoint is built.
///
/// Carries the general kind plus the context that triggered it; the
/// rendered form is `<kind>: <context>`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {context}")]
pub struct BuildError {
    kind: BuildErrorKind,
    context: String,
}

impl BuildError {
    /// Creates an [`BuildErrorKind::UnsupportedType`] error.
    #[must_use]
    pub fn unsupported_type(context: impl Into<String>) -> Self {
        Self {
            kind: BuildErrorKind::UnsupportedType,
            context: context.into(),
        }
    }

    /// Creates an [`BuildErrorKind::InvalidMapping`] error.
    #[must_use]
    pub fn invalid_mapping(context: impl Into<String>) -> Self {
        Self {
            kind: BuildErrorKind::InvalidMapping,
            context: context.into(),
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> BuildErrorKind {
        self.kind
    }

    /// Returns the context that triggered the error.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }
}

/// A failure while processing a single request.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The processor was built with mapping errors; this is the first one.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The request did not fit the compiled mapping: wrong number of path
    /// segments, an unparsable segment, a malformed query string.
    #[error("invalid mapping: {context}")]
    InvalidMapping {
        /// What failed to map.
        context: String,
        /// The underlying parse error, when there is one.
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The body codec failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Writing the response failed.
    #[error("response write failed: {0}")]
    Io(#[from] io::Error),
}

impl EndpointError {
    /// Creates a request-time mapping error with no underlying cause.
    #[must_use]
    pub fn invalid_mapping(context: impl Into<String>) -> Self {
        Self::InvalidMapping {
            context: context.into(),
            source: None,
        }
    }

    /// Wraps a path-segment conversion failure.
    #[must_use]
    pub fn segment(cause: SegmentError) -> Self {
        Self::InvalidMapping {
            context: cause.to_string(),
            source: Some(Box::new(cause)),
        }
    }
}
