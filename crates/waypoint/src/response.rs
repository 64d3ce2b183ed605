//! Response assembly.
//!
//! A handler may return nothing, a single value, or a tuple of values in
//! any order. Each return value implements [`ResponsePart`] and deposits
//! itself into one slot of a [`ResponseParts`]: status, headers, cookies,
//! body, or the error slot. Declared order is irrelevant on this side —
//! the processor always writes slots in the canonical order (content type,
//! headers, cookies, status, body), and the error slot, when occupied,
//! pre-empts everything else.
//!
//! Bodies come in two shapes. String- and byte-shaped returns (`String`,
//! `Vec<u8>`, `Bytes`, `[u8; N]`) are written verbatim when no encoder is
//! configured; with an encoder they are serialised like any other value.
//! An [`Entity`] always needs the endpoint's encoder, and an empty
//! `Entity` writes nothing.

use crate::error::EndpointError;
use crate::group::{ParamSpec, ParameterGroup};
use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use std::error::Error as StdError;
use std::io;
use std::sync::Arc;
use waypoint_codec::{CodecError, Encoder};

/// Deferred body serialisation, bound to the endpoint's encoder at the
/// moment the handler returns.
pub(crate) type EncodeFn = Box<dyn FnOnce(&mut dyn io::Write) -> Result<(), CodecError> + Send>;

/// A response body waiting to be written.
pub(crate) enum BodyPart {
    /// Bytes written verbatim.
    Raw(Bytes),
    /// A value serialised through the configured encoder at write time.
    Deferred(EncodeFn),
}

/// The slotted return vector of one handler invocation.
///
/// Filled by [`ResponsePart`] implementations; drained by the processor in
/// canonical order. Build-time classification guarantees each slot is
/// filled at most once.
#[derive(Default)]
pub struct ResponseParts {
    pub(crate) status: Option<StatusCode>,
    pub(crate) headers: Option<http::HeaderMap>,
    pub(crate) cookies: Option<Vec<crate::cookie::SetCookie>>,
    pub(crate) body: Option<BodyPart>,
    pub(crate) error: Option<Box<dyn StdError + Send + Sync>>,
}

impl ResponseParts {
    /// Whether the handler's error slot is occupied.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One handler return value, able to deposit itself into a response slot.
pub trait ResponsePart {
    /// Describes this return value for build-time classification.
    fn spec() -> ParamSpec;

    /// Deposits the value into its slot.
    ///
    /// `encoder` is the endpoint's configured encoder; only body-shaped
    /// parts consult it.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] when the value cannot be marshalled.
    fn apply<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError>;
}

/// The full return shape of a handler: nothing, one part, or a tuple of
/// parts in any order.
pub trait IntoParts {
    /// The descriptor manifest for build-time classification.
    fn specs() -> Vec<ParamSpec>;

    /// Converts the returned values into slotted response parts.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] when any part fails to marshal.
    fn into_parts<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
    ) -> Result<ResponseParts, EndpointError>;
}

/// An encoded response entity.
///
/// Wraps the value the configured encoder serialises into the response
/// body. An empty entity ([`Entity::none`]) writes no body at all, which
/// is how a handler declares a body slot it sometimes leaves unused.
///
/// # Example
///
/// ```rust,ignore
/// fn find(Path(id): Path<u64>) -> (StatusCode, Entity<Item>) {
///     match lookup(id) {
///         Some(item) => (StatusCode::OK, Entity::new(item)),
///         None => (StatusCode::NOT_FOUND, Entity::none()),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity<T>(Option<T>);

impl<T> Entity<T> {
    /// Wraps a value to be encoded into the response body.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// An empty entity: the body slot stays unwritten.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    /// Returns the wrapped value, if any.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> From<Option<T>> for Entity<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> ResponsePart for Entity<T>
where
    T: Serialize + Send + 'static,
{
    fn spec() -> ParamSpec {
        ParamSpec::of::<Entity<T>>(ParameterGroup::ResponseBody).with_codec()
    }

    fn apply<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        let Some(value) = self.0 else {
            return Ok(());
        };
        let Some(encoder) = encoder else {
            return Err(EndpointError::invalid_mapping(
                "mapping of response entity without encoder is impossible",
            ));
        };
        let encoder = Arc::clone(encoder);
        parts.body = Some(BodyPart::Deferred(Box::new(move |writer| {
            encoder.encode(writer, &value)
        })));
        Ok(())
    }
}

impl ResponsePart for StatusCode {
    fn spec() -> ParamSpec {
        ParamSpec::of::<StatusCode>(ParameterGroup::ResponseStatus)
    }

    fn apply<Enc: Encoder>(
        self,
        _encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.status = Some(self);
        Ok(())
    }
}

impl<Err> ResponsePart for Option<Err>
where
    Err: StdError + Send + Sync + 'static,
{
    fn spec() -> ParamSpec {
        ParamSpec::of::<Option<Err>>(ParameterGroup::ResponseError)
    }

    fn apply<Enc: Encoder>(
        self,
        _encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        if let Some(error) = self {
            parts.error = Some(Box::new(error));
        }
        Ok(())
    }
}

impl ResponsePart for String {
    fn spec() -> ParamSpec {
        ParamSpec::of::<String>(ParameterGroup::ResponseBody)
    }

    fn apply<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.body = Some(match encoder {
            Some(encoder) => {
                let encoder = Arc::clone(encoder);
                BodyPart::Deferred(Box::new(move |writer| encoder.encode(writer, &self)))
            }
            None => BodyPart::Raw(Bytes::from(self)),
        });
        Ok(())
    }
}

impl ResponsePart for Vec<u8> {
    fn spec() -> ParamSpec {
        ParamSpec::of::<Vec<u8>>(ParameterGroup::ResponseBody)
    }

    fn apply<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.body = Some(match encoder {
            Some(encoder) => {
                let encoder = Arc::clone(encoder);
                BodyPart::Deferred(Box::new(move |writer| encoder.encode(writer, &self)))
            }
            None => BodyPart::Raw(Bytes::from(self)),
        });
        Ok(())
    }
}

impl ResponsePart for Bytes {
    fn spec() -> ParamSpec {
        ParamSpec::of::<Bytes>(ParameterGroup::ResponseBody)
    }

    fn apply<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.body = Some(match encoder {
            Some(encoder) => {
                let encoder = Arc::clone(encoder);
                BodyPart::Deferred(Box::new(move |writer| encoder.encode(writer, &self)))
            }
            None => BodyPart::Raw(self),
        });
        Ok(())
    }
}

impl<const N: usize> ResponsePart for [u8; N] {
    fn spec() -> ParamSpec {
        ParamSpec::of::<[u8; N]>(ParameterGroup::ResponseBody)
    }

    fn apply<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.body = Some(match encoder {
            Some(encoder) => {
                let encoder = Arc::clone(encoder);
                let buffer = self.to_vec();
                BodyPart::Deferred(Box::new(move |writer| encoder.encode(writer, &buffer)))
            }
            None => BodyPart::Raw(Bytes::copy_from_slice(&self)),
        });
        Ok(())
    }
}

impl IntoParts for () {
    fn specs() -> Vec<ParamSpec> {
        Vec::new()
    }

    fn into_parts<Enc: Encoder>(
        self,
        _encoder: Option<&Arc<Enc>>,
    ) -> Result<ResponseParts, EndpointError> {
        Ok(ResponseParts::default())
    }
}

macro_rules! impl_into_parts_for_tuple {
    ($($part:ident),+) => {
        impl<$($part: ResponsePart),+> IntoParts for ($($part,)+) {
            fn specs() -> Vec<ParamSpec> {
                vec![$($part::spec()),+]
            }

            #[allow(non_snake_case)]
            fn into_parts<Enc: Encoder>(
                self,
                encoder: Option<&Arc<Enc>>,
            ) -> Result<ResponseParts, EndpointError> {
                let mut parts = ResponseParts::default();
                let ($($part,)+) = self;
                $($part.apply(encoder, &mut parts)?;)+
                Ok(parts)
            }
        }
    };
}

impl_into_parts_for_tuple!(R1);
impl_into_parts_for_tuple!(R1, R2);
impl_into_parts_for_tuple!(R1, R2, R3);
impl_into_parts_for_tuple!(R1, R2, R3, R4);
impl_into_parts_for_tuple!(R1, R2, R3, R4, R5);

macro_rules! impl_into_parts_for_part {
    ($($part:ty),+ $(,)?) => {
        $(
            impl IntoParts for $part {
                fn specs() -> Vec<ParamSpec> {
                    vec![<$part as ResponsePart>::spec()]
                }

                fn into_parts<Enc: Encoder>(
                    self,
                    encoder: Option<&Arc<Enc>>,
                ) -> Result<ResponseParts, EndpointError> {
                    let mut parts = ResponseParts::default();
                    self.apply(encoder, &mut parts)?;
                    Ok(parts)
                }
            }
        )+
    };
}

impl_into_parts_for_part!(
    StatusCode,
    crate::header::Headers,
    crate::cookie::SetCookies,
    String,
    Vec<u8>,
    Bytes,
);

impl<T> IntoParts for Entity<T>
where
    T: Serialize + Send + 'static,
{
    fn specs() -> Vec<ParamSpec> {
        vec![<Entity<T> as ResponsePart>::spec()]
    }

    fn into_parts<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
    ) -> Result<ResponseParts, EndpointError> {
        let mut parts = ResponseParts::default();
        self.apply(encoder, &mut parts)?;
        Ok(parts)
    }
}

impl<Err> IntoParts for Option<Err>
where
    Err: StdError + Send + Sync + 'static,
{
    fn specs() -> Vec<ParamSpec> {
        vec![<Option<Err> as ResponsePart>::spec()]
    }

    fn into_parts<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
    ) -> Result<ResponseParts, EndpointError> {
        let mut parts = ResponseParts::default();
        self.apply(encoder, &mut parts)?;
        Ok(parts)
    }
}

impl<const N: usize> IntoParts for [u8; N] {
    fn specs() -> Vec<ParamSpec> {
        vec![<[u8; N] as ResponsePart>::spec()]
    }

    fn into_parts<Enc: Encoder>(
        self,
        encoder: Option<&Arc<Enc>>,
    ) -> Result<ResponseParts, EndpointError> {
        let mut parts = ResponseParts::default();
        self.apply(encoder, &mut parts)?;
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_codec::{JsonCodec, NoCodec};

    fn drain_body(parts: ResponseParts) -> Vec<u8> {
        let mut out = Vec::new();
        match parts.body {
            Some(BodyPart::Raw(bytes)) => out.extend_from_slice(&bytes),
            Some(BodyPart::Deferred(encode)) => encode(&mut out).unwrap(),
            None => {}
        }
        out
    }

    #[test]
    fn test_string_body_is_verbatim_without_encoder() {
        let parts = String::from("plain").into_parts::<NoCodec>(None).unwrap();
        assert_eq!(drain_body(parts), b"plain");
    }

    #[test]
    fn test_string_body_is_encoded_with_encoder() {
        let encoder = Arc::new(JsonCodec);
        let parts = String::from("plain").into_parts(Some(&encoder)).unwrap();
        assert_eq!(drain_body(parts), b"\"plain\"");
    }

    #[test]
    fn test_byte_array_body_is_copied() {
        let parts = (*b"a1").into_parts::<NoCodec>(None).unwrap();
        assert_eq!(drain_body(parts), b"a1");
    }

    #[test]
    fn test_entity_requires_encoder() {
        #[derive(Serialize)]
        struct Payload {
            value: u32,
        }

        let result = Entity::new(Payload { value: 5 }).into_parts::<NoCodec>(None);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_entity_writes_nothing() {
        let encoder = Arc::new(JsonCodec);
        let parts = Entity::<u32>::none().into_parts(Some(&encoder)).unwrap();
        assert!(parts.body.is_none());
    }

    #[test]
    fn test_tuple_fills_slots_in_any_order() {
        #[derive(Debug, thiserror::Error)]
        #[error("boom")]
        struct Boom;

        let encoder = Arc::new(JsonCodec);
        let parts = (None::<Boom>, Entity::new(7u32), StatusCode::FOUND)
            .into_parts(Some(&encoder))
            .unwrap();

        assert_eq!(parts.status, Some(StatusCode::FOUND));
        assert!(!parts.has_error());
        assert_eq!(drain_body(parts), b"7");
    }

    #[test]
    fn test_error_slot_captures_value() {
        #[derive(Debug, thiserror::Error)]
        #[error("boom")]
        struct Boom;

        let parts = Some(Boom).into_parts::<NoCodec>(None).unwrap();
        assert!(parts.has_error());
    }

    #[test]
    fn test_unit_return_is_empty() {
        let parts = ().into_parts::<NoCodec>(None).unwrap();
        assert!(parts.status.is_none());
        assert!(parts.body.is_none());
        assert!(parts.headers.is_none());
    }

    #[test]
    fn test_specs_report_declared_order() {
        let specs = <(StatusCode, String)>::specs();
        assert_eq!(specs[0].group, ParameterGroup::ResponseStatus);
        assert_eq!(specs[1].group, ParameterGroup::ResponseBody);
    }
}
