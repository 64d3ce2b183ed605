//! Request-body extractor.

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::extractor::FromRequest;
use crate::group::{ParamSpec, ParameterGroup};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use std::sync::Arc;
use waypoint_codec::Decoder;

/// Extractor for the decoded request body.
///
/// The endpoint's configured decoder populates `T`; building an endpoint
/// with a `Body` input and no decoder is a mapping error. An absent
/// (empty) body yields `T::default()` without touching the decoder.
///
/// # Example
///
/// ```rust,ignore
/// fn create(Body(filters): Body<Vec<Filter>>) -> StatusCode { /* ... */ }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body<T>(pub T);

impl<T> Body<T> {
    /// Consumes the wrapper and returns the decoded value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Body<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned + Default> FromRequest for Body<T> {
    fn spec() -> ParamSpec {
        ParamSpec::of::<T>(ParameterGroup::Body).with_codec()
    }

    fn from_request<D: Decoder>(
        cx: &mut RequestContext<'_>,
        decoder: Option<&Arc<D>>,
    ) -> Result<Self, EndpointError> {
        let Some(decoder) = decoder else {
            return Err(EndpointError::invalid_mapping(
                "mapping of request body to struct without decoder is impossible",
            ));
        };
        if cx.body().is_empty() {
            return Ok(Body(T::default()));
        }
        let mut reader: &[u8] = cx.body().as_ref();
        let value = decoder.decode(&mut reader)?;
        Ok(Body(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Method;
    use waypoint_codec::JsonCodec;

    fn request(body: &'static [u8]) -> crate::Request {
        http::Request::builder()
            .method(Method::POST)
            .uri("/a")
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_decodes_json_body() {
        let request = request(br#"["f1", "f2"]"#);
        let mut cx = RequestContext::new(&request, Vec::new());
        let decoder = Arc::new(JsonCodec);

        let Body(filters) = Body::<Vec<String>>::from_request(&mut cx, Some(&decoder)).unwrap();
        assert_eq!(filters, vec!["f1", "f2"]);
    }

    #[test]
    fn test_empty_body_yields_default() {
        let request = request(b"");
        let mut cx = RequestContext::new(&request, Vec::new());
        let decoder = Arc::new(JsonCodec);

        let Body(filters) = Body::<Vec<String>>::from_request(&mut cx, Some(&decoder)).unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_missing_decoder_fails() {
        let request = request(b"{}");
        let mut cx = RequestContext::new(&request, Vec::new());

        let result = Body::<Vec<String>>::from_request::<waypoint_codec::NoCodec>(&mut cx, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_body_is_codec_error() {
        let request = request(b"{broken");
        let mut cx = RequestContext::new(&request, Vec::new());
        let decoder = Arc::new(JsonCodec);

        let err = Body::<Vec<String>>::from_request(&mut cx, Some(&decoder)).unwrap_err();
        assert!(matches!(err, EndpointError::Codec(_)));
    }

    #[test]
    fn test_spec_requires_codec() {
        let spec = Body::<Vec<String>>::spec();
        assert_eq!(spec.group, ParameterGroup::Body);
        assert!(spec.needs_codec);
    }
}
