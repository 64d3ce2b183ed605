//! # Waypoint
//!
//! A declarative HTTP endpoint-binding engine. A path template, a plain
//! function of arbitrary arity and return shape, and pluggable body codecs
//! are compiled into a frozen request processor: inputs are classified as
//! path segments, query values, headers, cookies, or the decoded body;
//! outputs as response body, status code, headers, cookies, or an error —
//! and each request flows through the compiled providers, the handler, and
//! the response resolvers in canonical order.
//!
//! Waypoint is not a server and not a router: it produces a
//! [`EndpointProcessor`] the host mounts however it likes, and matching is
//! positional against the single template the endpoint was declared with.
//!
//! ## Example
//!
//! ```rust
//! use waypoint::{post, media, Body, Entity, JsonCodec, Path, ResponseRecorder};
//! use bytes::Bytes;
//! use http::StatusCode;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Deserialize, Serialize)]
//! struct Filters(Vec<String>);
//!
//! let endpoint = post("/:assortment/filters")
//!     .decoder(JsonCodec)
//!     .encoder(JsonCodec)
//!     .response_content_type(media::application::JSON)
//!     .handler(|Path(assortment): Path<String>, Body(filters): Body<Filters>| {
//!         assert_eq!(assortment, "a1");
//!         (StatusCode::CREATED, Entity::new(filters))
//!     })
//!     .build();
//!
//! let request = http::Request::builder()
//!     .method(http::Method::POST)
//!     .uri("/a1/filters")
//!     .body(Bytes::from(r#"["f1", "f2"]"#))
//!     .unwrap();
//!
//! let mut recorder = ResponseRecorder::new();
//! endpoint.handle(&mut recorder, &request).unwrap();
//!
//! assert_eq!(recorder.status(), StatusCode::CREATED);
//! assert_eq!(recorder.body(), br#"["f1","f2"]"#);
//! ```
//!
//! ## Handler discipline
//!
//! Inputs read, in order: the [`Path`] parameters (exactly as many as the
//! template has `/:` slots), then any of [`Query`], [`Headers`],
//! [`Cookies`], and [`Body`], each at most once, in any order. Outputs may
//! appear in any order — [`http::StatusCode`], [`Headers`],
//! [`SetCookies`], a body ([`Entity`] or a string/byte value), and an
//! `Option<E>` error slot — and are written in the canonical response
//! order regardless. Violations are not panics: they accumulate as build
//! errors on the processor and surface at the first request.

#![doc(html_root_url = "https://docs.rs/waypoint/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod builder;
mod classify;
mod context;
mod cookie;
mod error;
mod extractor;
mod group;
mod handler;
mod header;
mod mapper;
mod path;
mod processor;
mod query;
mod response;
mod segment;
pub mod template;
mod writer;

pub use body::Body;
pub use builder::{
    connect, delete, get, head, options, patch, post, put, trace, Endpoint,
};
pub use context::{Request, RequestContext};
pub use cookie::{Cookie, Cookies, SameSite, SetCookie, SetCookies};
pub use error::{BuildError, BuildErrorKind, EndpointError};
pub use extractor::FromRequest;
pub use group::{ClassificationTable, ParamSpec, ParameterGroup};
pub use handler::Handler;
pub use header::Headers;
pub use mapper::{default_error_mapper, ErrorMapper, Interceptor};
pub use path::Path;
pub use processor::EndpointProcessor;
pub use query::{Query, QueryValues};
pub use response::{Entity, IntoParts, ResponsePart, ResponseParts};
pub use segment::{FromSegment, SegmentError};
pub use template::PathTemplate;
pub use writer::{ResponseRecorder, ResponseWriter};

// Re-export the codec surface so endpoints can be declared from one crate.
pub use waypoint_codec::{media, CodecError, ContentType, Decoder, Encoder, JsonCodec, NoCodec, XmlCodec};
