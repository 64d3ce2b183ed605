//! The response writer seam and an in-memory recorder for tests.
//!
//! The engine never talks to a socket. It writes through the
//! [`ResponseWriter`] trait — headers, then a status line, then body bytes —
//! and the host server adapts its own connection type to it. The
//! [`ResponseRecorder`] captures everything in memory, which is all tests
//! need.

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use std::io;

/// Destination for one HTTP response.
///
/// Body bytes go through the [`io::Write`] supertrait. The status is
/// latched: the first [`write_status`](Self::write_status) wins, and a body
/// write before any explicit status implies `200 OK`. Headers must be
/// populated before the status is written.
pub trait ResponseWriter: io::Write {
    /// The response headers, mutable until the status is written.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Writes the status line. Later calls are ignored.
    fn write_status(&mut self, status: StatusCode);
}

/// An in-memory [`ResponseWriter`].
///
/// # Example
///
/// ```rust
/// use waypoint::{ResponseRecorder, ResponseWriter};
/// use http::StatusCode;
/// use std::io::Write;
///
/// let mut recorder = ResponseRecorder::new();
/// recorder.write_status(StatusCode::CREATED);
/// recorder.write_all(b"done").unwrap();
///
/// assert_eq!(recorder.status(), StatusCode::CREATED);
/// assert_eq!(recorder.body(), b"done");
/// ```
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded status; `200 OK` when none was written.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// The recorded headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The recorded body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Converts the recording into an [`http::Response`].
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let status = self.status();
        let mut response = Response::new(Bytes::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseWriter for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }
}
