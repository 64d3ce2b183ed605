//! # Waypoint Codec
//!
//! Body codecs and the media-type catalogue for the waypoint endpoint
//! engine.
//!
//! The engine itself never names a serialisation format: request bodies are
//! decoded and response entities encoded through the [`Decoder`] and
//! [`Encoder`] traits defined here. Two reference codecs are provided —
//! [`JsonCodec`] and [`XmlCodec`], both UTF-8 — and any type implementing
//! the traits plugs in the same way.
//!
//! ## Example
//!
//! ```rust
//! use waypoint_codec::{Decoder, Encoder, JsonCodec};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Note {
//!     text: String,
//! }
//!
//! let note = Note { text: "hello".into() };
//!
//! let mut bytes = Vec::new();
//! JsonCodec.encode(&mut bytes, &note).unwrap();
//!
//! let decoded: Note = JsonCodec.decode(&mut bytes.as_slice()).unwrap();
//! assert_eq!(decoded, note);
//! ```

#![doc(html_root_url = "https://docs.rs/waypoint-codec/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod error;
pub mod media;

pub use codec::{Decoder, Encoder, JsonCodec, NoCodec, XmlCodec};
pub use error::CodecError;
pub use media::ContentType;
