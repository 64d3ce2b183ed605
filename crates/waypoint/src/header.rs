//! Header map sentinel, usable on both sides of a handler.
//!
//! As an input, [`Headers`] hands the handler the full request header map.
//! As a return value, it carries response headers: the resolver sets the
//! first value of each name and appends the rest, so multi-valued headers
//! survive intact.

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::extractor::FromRequest;
use crate::group::{ParamSpec, ParameterGroup};
use crate::response::{ResponsePart, ResponseParts};
use http::HeaderMap;
use std::ops::Deref;
use std::sync::Arc;
use waypoint_codec::{Decoder, Encoder};

/// The HTTP header map sentinel.
///
/// # Example
///
/// ```rust,ignore
/// fn audit(Headers(headers): Headers) -> Headers {
///     let mut out = http::HeaderMap::new();
///     out.insert("x-audit", "ok".parse().unwrap());
///     Headers(out)
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Headers(pub HeaderMap);

impl Headers {
    /// Consumes the wrapper and returns the header map.
    #[must_use]
    pub fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl Deref for Headers {
    type Target = HeaderMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Headers {
    fn spec() -> ParamSpec {
        ParamSpec::of::<Headers>(ParameterGroup::Header)
    }

    fn from_request<D: Decoder>(
        cx: &mut RequestContext<'_>,
        _decoder: Option<&Arc<D>>,
    ) -> Result<Self, EndpointError> {
        // Iterating a HeaderMap repeats the name for each of its values,
        // so appending pair by pair keeps multi-valued headers intact.
        let source = cx.headers();
        let mut map = HeaderMap::with_capacity(source.len());
        for (name, value) in source {
            map.append(name, value.clone());
        }
        Ok(Headers(map))
    }
}

impl ResponsePart for Headers {
    fn spec() -> ParamSpec {
        ParamSpec::of::<Headers>(ParameterGroup::ResponseHeader)
    }

    fn apply<Enc: Encoder>(
        self,
        _encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.headers = Some(self.0);
        Ok(())
    }
}
