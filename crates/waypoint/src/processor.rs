//! The frozen endpoint processor.

use crate::context::Request;
use crate::error::{BuildError, EndpointError};
use crate::response::ResponseParts;
use crate::writer::ResponseWriter;
use http::Method;

pub(crate) type ProcessFn =
    Box<dyn Fn(&Request) -> Result<ResponseParts, EndpointError> + Send + Sync>;
pub(crate) type ProduceFn = Box<
    dyn Fn(ResponseParts, &mut dyn ResponseWriter, &Request) -> Result<(), EndpointError>
        + Send
        + Sync,
>;

/// The frozen product of building an endpoint.
///
/// Immutable after construction and safe to share across arbitrarily many
/// concurrent requests: everything mutable lives per invocation, on the
/// stack of [`handle`](Self::handle).
///
/// A processor built from a handler with mapping errors is *poisoned*:
/// every invocation returns the first build error and neither the request
/// nor the response stage runs. All accumulated errors stay inspectable
/// through [`build_errors`](Self::build_errors).
pub struct EndpointProcessor {
    method: Method,
    errors: Vec<BuildError>,
    process_request: ProcessFn,
    produce_response: ProduceFn,
}

impl EndpointProcessor {
    pub(crate) fn new(method: Method, process_request: ProcessFn, produce_response: ProduceFn) -> Self {
        Self {
            method,
            errors: Vec::new(),
            process_request,
            produce_response,
        }
    }

    pub(crate) fn poisoned(method: Method, errors: Vec<BuildError>) -> Self {
        Self {
            method,
            errors,
            process_request: Box::new(|_: &Request| Ok(ResponseParts::default())),
            produce_response: Box::new(
                |_: ResponseParts, _: &mut dyn ResponseWriter, _: &Request| Ok(()),
            ),
        }
    }

    /// Processes one request: providers in declared order, the handler,
    /// then resolvers in canonical order (or the error mapper).
    ///
    /// # Errors
    ///
    /// Returns the first build error when the processor is poisoned, or
    /// the first provider/resolver failure. Handler-returned errors are
    /// not surfaced here — the error mapper renders them and they count
    /// as handled.
    pub fn handle(
        &self,
        writer: &mut dyn ResponseWriter,
        request: &Request,
    ) -> Result<(), EndpointError> {
        if let Some(first) = self.errors.first() {
            return Err(EndpointError::Build(first.clone()));
        }
        let parts = (self.process_request)(request)?;
        (self.produce_response)(parts, writer, request)
    }

    /// The mapping errors accumulated while the endpoint was built.
    #[must_use]
    pub fn build_errors(&self) -> &[BuildError] {
        &self.errors
    }

    /// The HTTP method this endpoint was declared for. The engine does not
    /// route; hosts use this to mount the processor.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }
}
