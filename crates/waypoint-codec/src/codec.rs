//! Body codec interface and the reference codecs.
//!
//! A [`Decoder`] turns request-body bytes into a caller-chosen type; an
//! [`Encoder`] serialises a handler return value into response-body bytes.
//! Both are driven through serde, so any type that derives
//! [`serde::Deserialize`]/[`serde::Serialize`] works with any codec.
//!
//! The traits use generic methods and are dispatched statically: an endpoint
//! is built against concrete codec types, and the codec instance is shared
//! across every request to that endpoint.

use crate::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decodes a request body into a caller-supplied target type.
///
/// # Example
///
/// ```rust
/// use waypoint_codec::{Decoder, JsonCodec};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// let body = br#"{"name": "Alice"}"#;
/// let user: CreateUser = JsonCodec.decode(&mut &body[..]).unwrap();
/// assert_eq!(user.name, "Alice");
/// ```
pub trait Decoder: Send + Sync + 'static {
    /// Reads the full body from `reader` and decodes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] when the input is malformed or the reader
    /// fails.
    fn decode<T: DeserializeOwned>(&self, reader: &mut dyn io::Read) -> Result<T, CodecError>;
}

/// Encodes a response value into a byte writer.
pub trait Encoder: Send + Sync + 'static {
    /// Serialises `value` into `writer`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] when serialisation or the write fails.
    fn encode<T: Serialize>(&self, writer: &mut dyn io::Write, value: &T) -> Result<(), CodecError>;
}

/// JSON reference codec, backed by `serde_json`. Assumes UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Decoder for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, reader: &mut dyn io::Read) -> Result<T, CodecError> {
        serde_json::from_reader(reader).map_err(CodecError::decode)
    }
}

impl Encoder for JsonCodec {
    fn encode<T: Serialize>(&self, writer: &mut dyn io::Write, value: &T) -> Result<(), CodecError> {
        serde_json::to_writer(writer, value).map_err(CodecError::encode)
    }
}

/// XML reference codec, backed by `quick-xml`. Assumes UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl Decoder for XmlCodec {
    fn decode<T: DeserializeOwned>(&self, reader: &mut dyn io::Read) -> Result<T, CodecError> {
        let mut document = String::new();
        reader.read_to_string(&mut document)?;
        quick_xml::de::from_str(&document).map_err(CodecError::decode)
    }
}

impl Encoder for XmlCodec {
    fn encode<T: Serialize>(&self, writer: &mut dyn io::Write, value: &T) -> Result<(), CodecError> {
        let document = quick_xml::se::to_string(value).map_err(CodecError::encode)?;
        writer.write_all(document.as_bytes())?;
        Ok(())
    }
}

/// Placeholder codec for endpoints that never configured one.
///
/// Every operation fails with [`CodecError::Unconfigured`]; the endpoint
/// builder rejects handler shapes that would reach it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCodec;

impl Decoder for NoCodec {
    fn decode<T: DeserializeOwned>(&self, _reader: &mut dyn io::Read) -> Result<T, CodecError> {
        Err(CodecError::Unconfigured)
    }
}

impl Encoder for NoCodec {
    fn encode<T: Serialize>(&self, _writer: &mut dyn io::Write, _value: &T) -> Result<(), CodecError> {
        Err(CodecError::Unconfigured)
    }
}
