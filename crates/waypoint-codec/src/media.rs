//! Response content-type catalogue.
//!
//! A [`ContentType`] is a ready-to-send media-type string for the
//! `Content-Type` response header. The catalogue below covers the common
//! IANA media types, with `charset=utf-8` attached to the textual ones.
//! Anything else can be built with [`ContentType::new`].
//!
//! # Example
//!
//! ```rust
//! use waypoint_codec::media;
//!
//! assert_eq!(media::application::JSON.as_str(), "application/json; charset=utf-8");
//! assert_eq!(media::application::ZIP.as_str(), "application/zip");
//!
//! let custom = media::ContentType::new("application/vnd.acme+json");
//! assert_eq!(custom.as_str(), "application/vnd.acme+json");
//! ```

use std::borrow::Cow;
use std::fmt;

/// A media-type string for the `Content-Type` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType(Cow<'static, str>);

impl ContentType {
    /// Creates a content type from a static media-type string.
    #[must_use]
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Creates a content type from an owned media-type string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// Returns the media-type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `application/*` media types.
pub mod application {
    use super::ContentType;

    /// `application/json; charset=utf-8`
    pub const JSON: ContentType = ContentType::from_static("application/json; charset=utf-8");
    /// `application/xml; charset=utf-8`
    pub const XML: ContentType = ContentType::from_static("application/xml; charset=utf-8");
    /// `application/zip`
    pub const ZIP: ContentType = ContentType::from_static("application/zip");
    /// `application/gzip`
    pub const GZIP: ContentType = ContentType::from_static("application/gzip");
    /// `application/pdf`
    pub const PDF: ContentType = ContentType::from_static("application/pdf");
}

/// `multipart/*` media types.
pub mod multipart {
    use super::ContentType;

    /// `multipart/form-data`
    pub const FORM_DATA: ContentType = ContentType::from_static("multipart/form-data");
}

/// `text/*` media types. All carry `charset=utf-8`.
pub mod text {
    use super::ContentType;

    /// `text/cmd; charset=utf-8`
    pub const CMD: ContentType = ContentType::from_static("text/cmd; charset=utf-8");
    /// `text/css; charset=utf-8`
    pub const CSS: ContentType = ContentType::from_static("text/css; charset=utf-8");
    /// `text/csv; charset=utf-8`
    pub const CSV: ContentType = ContentType::from_static("text/csv; charset=utf-8");
    /// `text/html; charset=utf-8`
    pub const HTML: ContentType = ContentType::from_static("text/html; charset=utf-8");
    /// `text/plain; charset=utf-8`
    pub const PLAIN: ContentType = ContentType::from_static("text/plain; charset=utf-8");
    /// `text/xml; charset=utf-8`
    pub const XML: ContentType = ContentType::from_static("text/xml; charset=utf-8");
}
