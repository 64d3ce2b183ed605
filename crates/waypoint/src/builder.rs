//! The immutable endpoint builder.
//!
//! An [`Endpoint`] is a value object: every fluent call leaves the
//! receiver untouched and returns a new builder carrying the change, so a
//! partially configured endpoint can be shared and specialised freely.
//! [`build`](Endpoint::build) is the terminal step — it classifies the
//! handler, compiles the providers and resolvers, and freezes everything
//! into an [`EndpointProcessor`]. Mapping errors never abort the build;
//! they poison the processor and surface at the first request.

use crate::classify::classify;
use crate::context::RequestContext;
use crate::error::{BuildError, EndpointError};
use crate::group::ParameterGroup;
use crate::handler::Handler;
use crate::mapper::{default_error_mapper, ErrorMapper, Interceptor};
use crate::processor::{EndpointProcessor, ProcessFn, ProduceFn};
use crate::response::{BodyPart, IntoParts, ResponseParts};
use crate::template::PathTemplate;
use crate::writer::ResponseWriter;
use http::{header, HeaderValue, Method, StatusCode};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::sync::Arc;
use waypoint_codec::{ContentType, Decoder, Encoder, NoCodec};

/// A declarative endpoint under construction.
///
/// Type parameters track what has been configured so far: the handler and
/// its argument tuple, the decoder, and the encoder. They are inferred
/// through the fluent chain and never written by hand.
///
/// # Example
///
/// ```rust
/// use waypoint::{get, Path, ResponseRecorder};
/// use bytes::Bytes;
///
/// let endpoint = get("/:id")
///     .handler(|Path(id): Path<u64>| format!("item {id}"))
///     .build();
///
/// let request = http::Request::builder()
///     .uri("/42")
///     .body(Bytes::new())
///     .unwrap();
/// let mut recorder = ResponseRecorder::new();
/// endpoint.handle(&mut recorder, &request).unwrap();
///
/// assert_eq!(recorder.body(), b"item 42");
/// ```
pub struct Endpoint<H = (), Args = (), D = NoCodec, E = NoCodec> {
    method: Method,
    template: PathTemplate,
    decoder: Option<Arc<D>>,
    encoder: Option<Arc<E>>,
    content_type: Option<ContentType>,
    error_mapper: Option<ErrorMapper>,
    handler: H,
    _args: PhantomData<fn(Args) -> Args>,
}

impl<H: Clone, Args, D, E> Clone for Endpoint<H, Args, D, E> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            template: self.template.clone(),
            decoder: self.decoder.clone(),
            encoder: self.encoder.clone(),
            content_type: self.content_type.clone(),
            error_mapper: self.error_mapper.clone(),
            handler: self.handler.clone(),
            _args: PhantomData,
        }
    }
}

impl Endpoint {
    /// Starts an endpoint for `method` bound to a path template.
    #[must_use]
    pub fn new(method: Method, template: &str) -> Self {
        Self {
            method,
            template: PathTemplate::parse(template),
            decoder: None,
            encoder: None,
            content_type: None,
            error_mapper: None,
            handler: (),
            _args: PhantomData,
        }
    }
}

impl<H: Clone, Args, D, E> Endpoint<H, Args, D, E> {
    /// Replaces the path template.
    #[must_use]
    pub fn path(&self, template: &str) -> Self {
        let mut cloned = self.clone();
        cloned.template = PathTemplate::parse(template);
        cloned
    }

    /// Configures the request-body decoder.
    #[must_use]
    pub fn decoder<D2: Decoder>(&self, decoder: D2) -> Endpoint<H, Args, D2, E> {
        Endpoint {
            method: self.method.clone(),
            template: self.template.clone(),
            decoder: Some(Arc::new(decoder)),
            encoder: self.encoder.clone(),
            content_type: self.content_type.clone(),
            error_mapper: self.error_mapper.clone(),
            handler: self.handler.clone(),
            _args: PhantomData,
        }
    }

    /// Configures the response-body encoder.
    #[must_use]
    pub fn encoder<E2: Encoder>(&self, encoder: E2) -> Endpoint<H, Args, D, E2> {
        Endpoint {
            method: self.method.clone(),
            template: self.template.clone(),
            decoder: self.decoder.clone(),
            encoder: Some(Arc::new(encoder)),
            content_type: self.content_type.clone(),
            error_mapper: self.error_mapper.clone(),
            handler: self.handler.clone(),
            _args: PhantomData,
        }
    }

    /// Binds the handler function.
    #[must_use]
    pub fn handler<H2, Args2>(&self, handler: H2) -> Endpoint<H2, Args2, D, E>
    where
        H2: Handler<Args2>,
    {
        Endpoint {
            method: self.method.clone(),
            template: self.template.clone(),
            decoder: self.decoder.clone(),
            encoder: self.encoder.clone(),
            content_type: self.content_type.clone(),
            error_mapper: self.error_mapper.clone(),
            handler,
            _args: PhantomData,
        }
    }

    /// Fixes the response `Content-Type` header.
    #[must_use]
    pub fn response_content_type(&self, content_type: ContentType) -> Self {
        let mut cloned = self.clone();
        cloned.content_type = Some(content_type);
        cloned
    }

    /// Configures how handler-returned errors render into the response.
    #[must_use]
    pub fn error_mapping(&self, error_mapper: ErrorMapper) -> Self {
        let mut cloned = self.clone();
        cloned.error_mapper = Some(error_mapper);
        cloned
    }

    // TODO: wire interceptors into request processing; the open question is
    // whether they chain like handlers (same mapping rules) or stay plain
    // writer/request callbacks.

    /// Declares a before-interceptor. Accepted but not yet run.
    #[must_use]
    pub fn before(&self, _interceptor: Interceptor) -> Self {
        self.clone()
    }

    /// Declares an after-interceptor. Accepted but not yet run.
    #[must_use]
    pub fn after(&self, _interceptor: Interceptor) -> Self {
        self.clone()
    }

    /// The HTTP method this endpoint is declared for.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The parsed path template.
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }
}

impl<H, Args, D, E> Endpoint<H, Args, D, E>
where
    H: Handler<Args>,
    D: Decoder,
    E: Encoder,
{
    /// Classifies the handler, compiles providers and resolvers, and
    /// freezes the endpoint into a processor.
    ///
    /// Mapping errors do not abort the build: they are accumulated on the
    /// returned processor, which surfaces the first of them on every
    /// invocation.
    #[must_use]
    pub fn build(&self) -> EndpointProcessor {
        let inputs = H::input_specs();
        let outputs = H::output_specs();
        let mut classification = classify(&inputs, &outputs, self.template.arity());

        if classification.table.contains(ParameterGroup::Body) && self.decoder.is_none() {
            classification.errors.push(BuildError::invalid_mapping(
                "mapping of request body to struct without decoder is impossible",
            ));
        }
        if let Some(spec) = classification.table.first(ParameterGroup::ResponseBody) {
            if spec.needs_codec && self.encoder.is_none() {
                classification.errors.push(BuildError::invalid_mapping(
                    "mapping of response entity without encoder is impossible",
                ));
            }
        }

        let content_type = match &self.content_type {
            None => None,
            Some(content_type) => match HeaderValue::from_str(content_type.as_str()) {
                Ok(value) => Some(value),
                Err(_) => {
                    classification.errors.push(BuildError::invalid_mapping(format!(
                        "response content type '{}' is not a valid header value",
                        content_type.as_str(),
                    )));
                    None
                }
            },
        };

        if !classification.errors.is_empty() {
            tracing::warn!(
                template = %self.template.raw(),
                errors = classification.errors.len(),
                "endpoint build produced mapping errors"
            );
            return EndpointProcessor::poisoned(self.method.clone(), classification.errors);
        }

        tracing::debug!(
            template = %self.template.raw(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "compiled endpoint processor"
        );

        EndpointProcessor::new(
            self.method.clone(),
            self.compile_process(),
            Self::compile_produce(content_type, self.error_mapper.clone()),
        )
    }

    fn compile_process(&self) -> ProcessFn {
        let handler = self.handler.clone();
        let decoder = self.decoder.clone();
        let encoder = self.encoder.clone();
        let template = self.template.clone();
        Box::new(move |request: &crate::Request| {
            let segments = template.extract(request.uri().path());
            if segments.len() != template.arity() {
                return Err(EndpointError::invalid_mapping(format!(
                    "unexpected amount of path parameters: {}, expected: {}",
                    segments.len(),
                    template.arity(),
                )));
            }
            let mut cx = RequestContext::new(request, segments);
            let output = handler.invoke(&mut cx, decoder.as_ref())?;
            output.into_parts(encoder.as_ref())
        })
    }

    fn compile_produce(content_type: Option<HeaderValue>, mapper: Option<ErrorMapper>) -> ProduceFn {
        let mapper = mapper.unwrap_or_else(default_error_mapper);
        Box::new(move |parts: ResponseParts, writer: &mut dyn ResponseWriter, request: &crate::Request| {
            if let Some(error) = parts.error {
                return (mapper)(error.as_ref(), writer, request);
            }

            if let Some(value) = &content_type {
                writer.headers_mut().insert(header::CONTENT_TYPE, value.clone());
            }

            if let Some(map) = parts.headers {
                for name in map.keys() {
                    let mut values = map.get_all(name).into_iter();
                    if let Some(first) = values.next() {
                        writer.headers_mut().insert(name.clone(), first.clone());
                        for value in values {
                            writer.headers_mut().append(name.clone(), value.clone());
                        }
                    }
                }
            }

            if let Some(cookies) = parts.cookies {
                for cookie in cookies {
                    let value =
                        HeaderValue::from_str(&cookie.to_string()).map_err(|_| {
                            EndpointError::invalid_mapping(format!(
                                "cookie '{}' is not a valid header value",
                                cookie.name(),
                            ))
                        })?;
                    writer.headers_mut().append(header::SET_COOKIE, value);
                }
            }

            writer.write_status(parts.status.unwrap_or(StatusCode::OK));

            match parts.body {
                Some(BodyPart::Raw(bytes)) => writer.write_all(&bytes)?,
                Some(BodyPart::Deferred(encode)) => encode(&mut BodySink(&mut *writer))?,
                None => {}
            }
            Ok(())
        })
    }
}

/// Adapts the response writer into the `io::Write` the encoders expect.
struct BodySink<'a>(&'a mut dyn ResponseWriter);

impl io::Write for BodySink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Starts a `GET` endpoint.
#[must_use]
pub fn get(template: &str) -> Endpoint {
    Endpoint::new(Method::GET, template)
}

/// Starts a `POST` endpoint.
#[must_use]
pub fn post(template: &str) -> Endpoint {
    Endpoint::new(Method::POST, template)
}

/// Starts a `PUT` endpoint.
#[must_use]
pub fn put(template: &str) -> Endpoint {
    Endpoint::new(Method::PUT, template)
}

/// Starts a `PATCH` endpoint.
#[must_use]
pub fn patch(template: &str) -> Endpoint {
    Endpoint::new(Method::PATCH, template)
}

/// Starts a `DELETE` endpoint.
#[must_use]
pub fn delete(template: &str) -> Endpoint {
    Endpoint::new(Method::DELETE, template)
}

/// Starts a `HEAD` endpoint.
#[must_use]
pub fn head(template: &str) -> Endpoint {
    Endpoint::new(Method::HEAD, template)
}

/// Starts an `OPTIONS` endpoint.
#[must_use]
pub fn options(template: &str) -> Endpoint {
    Endpoint::new(Method::OPTIONS, template)
}

/// Starts a `TRACE` endpoint.
#[must_use]
pub fn trace(template: &str) -> Endpoint {
    Endpoint::new(Method::TRACE, template)
}

/// Starts a `CONNECT` endpoint.
#[must_use]
pub fn connect(template: &str) -> Endpoint {
    Endpoint::new(Method::CONNECT, template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildErrorKind;
    use crate::header::Headers;
    use crate::path::Path;
    use crate::writer::ResponseRecorder;
    use bytes::Bytes;
    use waypoint_codec::media;

    fn request(uri: &str) -> crate::Request {
        http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_verb_constructors_record_method() {
        assert_eq!(get("/").method(), &Method::GET);
        assert_eq!(post("/").method(), &Method::POST);
        assert_eq!(put("/").method(), &Method::PUT);
        assert_eq!(patch("/").method(), &Method::PATCH);
        assert_eq!(delete("/").method(), &Method::DELETE);
        assert_eq!(head("/").method(), &Method::HEAD);
        assert_eq!(options("/").method(), &Method::OPTIONS);
        assert_eq!(trace("/").method(), &Method::TRACE);
        assert_eq!(connect("/").method(), &Method::CONNECT);
    }

    #[test]
    fn test_builder_calls_leave_the_receiver_untouched() {
        let base = get("/:id");
        let specialised = base.response_content_type(media::application::JSON);

        // The shared base still builds without the specialisation.
        let plain = base.handler(|Path(_): Path<u64>| ()).build();
        let json = specialised.handler(|Path(_): Path<u64>| ()).build();

        let mut recorder = ResponseRecorder::new();
        plain.handle(&mut recorder, &request("/7")).unwrap();
        assert!(recorder.headers().get(header::CONTENT_TYPE).is_none());

        let mut recorder = ResponseRecorder::new();
        json.handle(&mut recorder, &request("/7")).unwrap();
        assert_eq!(
            recorder.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn test_path_replaces_template() {
        let endpoint = get("/:a").path("/x/:b/:c");
        assert_eq!(endpoint.template().arity(), 2);
        assert_eq!(endpoint.template().raw(), "/x/:b/:c");
    }

    #[test]
    fn test_missing_path_receiver_poisons_build() {
        let processor = get("/:id").handler(|| ()).build();
        let errors = processor.build_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), BuildErrorKind::InvalidMapping);
    }

    #[test]
    fn test_non_path_input_in_path_position_is_unsupported() {
        let processor = get("/:id").handler(|Headers(_): Headers| ()).build();
        let errors = processor.build_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), BuildErrorKind::UnsupportedType);
    }

    #[test]
    fn test_interceptors_are_inert() {
        let noop: Interceptor = Arc::new(|_, _| true);
        let processor = get("/")
            .before(Arc::clone(&noop))
            .after(noop)
            .handler(|| ())
            .build();
        assert!(processor.build_errors().is_empty());
    }
}
