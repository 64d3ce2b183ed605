//! Positional path-parameter extractor.

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::extractor::FromRequest;
use crate::group::{ParamSpec, ParameterGroup};
use crate::segment::FromSegment;
use std::ops::Deref;
use std::sync::Arc;
use waypoint_codec::Decoder;

/// Extractor for one URL path segment.
///
/// `Path<T>` binds positionally: the first `Path` input of the handler
/// takes the first `/:` slot of the template, the second takes the second,
/// and so on. `T` is any [`FromSegment`] type — the primitive scalars,
/// byte buffers, or a user type carrying its own conversion.
///
/// The handler's `Path` inputs must come first and their count must equal
/// the number of template slots; both rules are checked when the endpoint
/// is built.
///
/// # Example
///
/// ```rust,ignore
/// // template: /some/part/:id/:assortment/here
/// fn locate(Path(id): Path<u16>, Path(assortment): Path<String>) { /* ... */ }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Consumes the wrapper and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Path<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: FromSegment> FromRequest for Path<T> {
    fn spec() -> ParamSpec {
        ParamSpec::of::<T>(ParameterGroup::Path)
    }

    fn from_request<D: Decoder>(
        cx: &mut RequestContext<'_>,
        _decoder: Option<&Arc<D>>,
    ) -> Result<Self, EndpointError> {
        let segment = cx.next_segment()?;
        let value = T::from_segment(segment).map_err(EndpointError::segment)?;
        Ok(Path(value))
    }
}
