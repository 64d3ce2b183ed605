//! Per-request extraction context.
//!
//! A [`RequestContext`] is assembled once per request: the borrowed
//! request plus the path-segment values already sliced out by the
//! template. Extractors read from it; path extractors additionally
//! consume segments through an advancing cursor, which is what keeps
//! positional binding in declared order.

use crate::error::EndpointError;
use bytes::Bytes;
use http::HeaderMap;

/// The request shape the engine consumes: an [`http::Request`] with a
/// fully buffered [`Bytes`] body.
pub type Request = http::Request<Bytes>;

/// Borrowed view of one request during argument extraction.
#[derive(Debug)]
pub struct RequestContext<'req> {
    request: &'req Request,
    segments: Vec<&'req str>,
    cursor: usize,
}

impl<'req> RequestContext<'req> {
    /// Creates a context over `request` and its extracted path segments.
    #[must_use]
    pub fn new(request: &'req Request, segments: Vec<&'req str>) -> Self {
        Self {
            request,
            segments,
            cursor: 0,
        }
    }

    /// The underlying request.
    #[must_use]
    pub fn request(&self) -> &'req Request {
        self.request
    }

    /// The request headers.
    #[must_use]
    pub fn headers(&self) -> &'req HeaderMap {
        self.request.headers()
    }

    /// The raw query string, or `""` when the URI has none.
    #[must_use]
    pub fn query_string(&self) -> &'req str {
        self.request.uri().query().unwrap_or("")
    }

    /// The buffered request body.
    #[must_use]
    pub fn body(&self) -> &'req Bytes {
        self.request.body()
    }

    /// Consumes and returns the next path-segment value.
    ///
    /// # Errors
    ///
    /// Returns a request-time mapping error when the path carried fewer
    /// segments than the handler declares.
    pub fn next_segment(&mut self) -> Result<&'req str, EndpointError> {
        let Some(&segment) = self.segments.get(self.cursor) else {
            return Err(EndpointError::invalid_mapping(format!(
                "unexpected amount of path parameters: {}, expected at least {}",
                self.segments.len(),
                self.cursor + 1,
            )));
        };
        self.cursor += 1;
        Ok(segment)
    }

    /// Path-segment values not yet consumed.
    #[must_use]
    pub fn remaining_segments(&self) -> usize {
        self.segments.len() - self.cursor
    }
}
