//! Cookie extraction and response cookies.
//!
//! [`Cookies`] parses the request's `Cookie` headers into an ordered list
//! of name/value pairs. [`SetCookies`] carries response cookies, each a
//! full [`SetCookie`] with its attributes, appended to the response as
//! `Set-Cookie` headers.

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::extractor::FromRequest;
use crate::group::{ParamSpec, ParameterGroup};
use crate::response::{ResponsePart, ResponseParts};
use http::header;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use waypoint_codec::{Decoder, Encoder};

/// A single cookie received with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
}

impl Cookie {
    /// Creates a cookie pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Extractor for the ordered request cookie list.
///
/// Cookies appear in header order. Values keep surrounding quotes
/// stripped; malformed fragments without `=` are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies(pub Vec<Cookie>);

impl Cookies {
    /// The first cookie named `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|cookie| cookie.name == name)
            .map(Cookie::value)
    }

    /// The number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the request carried no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn parse_fragment(fragment: &str) -> Option<Cookie> {
        let (name, value) = fragment.trim().split_once('=')?;
        let value = value.trim().trim_matches('"');
        Some(Cookie::new(name.trim(), value))
    }
}

impl Deref for Cookies {
    type Target = [Cookie];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Cookies {
    fn spec() -> ParamSpec {
        ParamSpec::of::<Cookies>(ParameterGroup::Cookie)
    }

    fn from_request<D: Decoder>(
        cx: &mut RequestContext<'_>,
        _decoder: Option<&Arc<D>>,
    ) -> Result<Self, EndpointError> {
        let mut cookies = Vec::new();
        for value in cx.headers().get_all(header::COOKIE) {
            let value = value.to_str().map_err(|_| {
                EndpointError::invalid_mapping("invalid UTF-8 in Cookie header")
            })?;
            cookies.extend(value.split(';').filter_map(Self::parse_fragment));
        }
        Ok(Cookies(cookies))
    }
}

/// `SameSite` cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Only sent with same-site requests.
    Strict,
    /// Sent with same-site requests and cross-site top-level navigations.
    Lax,
    /// Sent with cross-site requests.
    None,
}

impl SameSite {
    fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A response cookie.
///
/// Carries the `name=value` pair plus the standard attribute set: `Path`,
/// `Domain`, `Expires`, `Max-Age`, and the `HttpOnly`/`Secure`/`SameSite`
/// flags. The [`Display`](fmt::Display) rendering is the `Set-Cookie`
/// header value, attributes in the conventional serialisation order.
///
/// # Example
///
/// ```rust
/// use waypoint::{SameSite, SetCookie};
///
/// let cookie = SetCookie::new("session", "abc123")
///     .path("/")
///     .max_age(3600)
///     .http_only()
///     .same_site(SameSite::Strict);
///
/// assert_eq!(
///     cookie.to_string(),
///     "session=abc123; Path=/; Max-Age=3600; HttpOnly; SameSite=Strict",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    name: String,
    value: String,
    path: Option<String>,
    domain: Option<String>,
    expires: Option<String>,
    max_age: Option<u64>,
    http_only: bool,
    secure: bool,
    same_site: Option<SameSite>,
}

impl SetCookie {
    /// Creates a response cookie with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
            expires: None,
            max_age: None,
            http_only: false,
            secure: false,
            same_site: None,
        }
    }

    /// A cookie instructing the client to discard `name` immediately
    /// (`Max-Age=0`).
    #[must_use]
    pub fn expired(name: impl Into<String>) -> Self {
        Self::new(name, "").max_age(0)
    }

    /// Sets the `Path` attribute.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the `Domain` attribute.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the `Expires` attribute (an HTTP date string).
    #[must_use]
    pub fn expires(mut self, date: impl Into<String>) -> Self {
        self.expires = Some(date.into());
        self
    }

    /// Sets the `Max-Age` attribute, in seconds.
    #[must_use]
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Marks the cookie `HttpOnly`.
    #[must_use]
    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Marks the cookie `Secure`.
    #[must_use]
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Sets the `SameSite` policy.
    #[must_use]
    pub fn same_site(mut self, policy: SameSite) -> Self {
        self.same_site = Some(policy);
        self
    }

    /// The cookie name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(path) = &self.path {
            write!(f, "; Path={path}")?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if let Some(expires) = &self.expires {
            write!(f, "; Expires={expires}")?;
        }
        if let Some(seconds) = self.max_age {
            write!(f, "; Max-Age={seconds}")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if let Some(policy) = self.same_site {
            write!(f, "; SameSite={policy}")?;
        }
        Ok(())
    }
}

/// Response-cookie return value: every cookie becomes one `Set-Cookie`
/// header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCookies(pub Vec<SetCookie>);

impl SetCookies {
    /// Consumes the wrapper and returns the cookies.
    #[must_use]
    pub fn into_inner(self) -> Vec<SetCookie> {
        self.0
    }
}

impl ResponsePart for SetCookies {
    fn spec() -> ParamSpec {
        ParamSpec::of::<SetCookies>(ParameterGroup::ResponseCookie)
    }

    fn apply<Enc: Encoder>(
        self,
        _encoder: Option<&Arc<Enc>>,
        parts: &mut ResponseParts,
    ) -> Result<(), EndpointError> {
        parts.cookies = Some(self.0);
        Ok(())
    }
}
