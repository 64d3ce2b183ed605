//! Core extraction trait.
//!
//! Every handler input type implements [`FromRequest`]: it names the
//! parameter group it binds through [`spec`](FromRequest::spec), and it
//! pulls its value out of the [`RequestContext`] at request time. The
//! spec is what the build-time classification pass walks; the extraction
//! method is what the compiled processor runs, in the handler's declared
//! parameter order.

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::group::ParamSpec;
use std::sync::Arc;
use waypoint_codec::Decoder;

/// A type that can be extracted as one handler input.
///
/// Implementations exist for the positional [`Path`](crate::Path) wrapper,
/// the [`Query`](crate::Query), [`Headers`](crate::Headers), and
/// [`Cookies`](crate::Cookies) sentinels, and the decoded
/// [`Body`](crate::Body) wrapper.
pub trait FromRequest: Sized {
    /// Describes this input for build-time classification.
    fn spec() -> ParamSpec;

    /// Extracts the value from the request context.
    ///
    /// `decoder` is the endpoint's configured body decoder; only body
    /// extraction consults it.
    ///
    /// # Errors
    ///
    /// Returns an [`EndpointError`] when extraction fails.
    fn from_request<D: Decoder>(
        cx: &mut RequestContext<'_>,
        decoder: Option<&Arc<D>>,
    ) -> Result<Self, EndpointError>;
}
