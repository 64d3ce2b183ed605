//! Handler-error mapping and interceptor signatures.

use crate::context::Request;
use crate::error::EndpointError;
use crate::writer::ResponseWriter;
use http::{header, HeaderValue, StatusCode};
use std::error::Error as StdError;
use std::io::Write;
use std::sync::Arc;

/// Renders a handler-returned error into the HTTP response.
///
/// When a handler's error slot is occupied, the mapper owns the whole
/// response: the engine runs no other resolver, and the mapper's return
/// value becomes the result of the request.
pub type ErrorMapper = Arc<
    dyn Fn(&(dyn StdError + Send + Sync), &mut dyn ResponseWriter, &Request) -> Result<(), EndpointError>
        + Send
        + Sync,
>;

/// A before/after interceptor. Declared on the builder but not yet wired
/// into request processing.
pub type Interceptor = Arc<dyn Fn(&mut dyn ResponseWriter, &Request) -> bool + Send + Sync>;

/// The fallback error mapper: `500 Internal Server Error`, plain text,
/// the error's message plus a trailing newline.
#[must_use]
pub fn default_error_mapper() -> ErrorMapper {
    Arc::new(|error, writer, _request| {
        writer.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        writer.write_status(StatusCode::INTERNAL_SERVER_ERROR);
        writeln!(writer, "{error}")?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ResponseRecorder;
    use bytes::Bytes;
    use http::Method;

    #[derive(Debug, thiserror::Error)]
    #[error("some error")]
    struct SomeError;

    #[test]
    fn test_default_mapper_writes_500_and_message() {
        let request: Request = http::Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Bytes::new())
            .unwrap();
        let mut recorder = ResponseRecorder::new();

        let mapper = default_error_mapper();
        mapper(&SomeError, &mut recorder, &request).unwrap();

        assert_eq!(recorder.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(recorder.body(), b"some error\n");
        assert_eq!(
            recorder.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
