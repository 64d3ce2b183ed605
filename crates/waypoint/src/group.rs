//! Parameter groups and the classification table.
//!
//! Every handler input and output belongs to exactly one [`ParameterGroup`].
//! The build-time classification pass walks the handler's descriptor
//! manifest and files each descriptor under its group, recording declared
//! order as it goes; the result drives provider and resolver compilation.

use std::collections::HashMap;

/// The semantic bucket a handler parameter is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterGroup {
    /// A positional URL path segment (request).
    Path,
    /// The parsed query-string values (request).
    Query,
    /// The request header map.
    Header,
    /// The decoded request body.
    Body,
    /// The request cookie list.
    Cookie,
    /// The response body.
    ResponseBody,
    /// The handler's error slot.
    ResponseError,
    /// The response status code.
    ResponseStatus,
    /// Response headers.
    ResponseHeader,
    /// Response cookies.
    ResponseCookie,
    /// The `Content-Type` header, populated from builder configuration
    /// rather than a handler return.
    ResponseContentType,
}

/// Describes one handler parameter: its group, the type behind it, and
/// whether marshalling it needs a configured codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// The group the parameter belongs to.
    pub group: ParameterGroup,
    /// The parameter's Rust type, for diagnostics.
    pub type_name: &'static str,
    /// Whether the parameter can only be marshalled through a codec
    /// (a decoder for request bodies, an encoder for response entities).
    pub needs_codec: bool,
}

impl ParamSpec {
    /// Describes a parameter of type `T` in `group`.
    #[must_use]
    pub fn of<T>(group: ParameterGroup) -> Self {
        Self {
            group,
            type_name: std::any::type_name::<T>(),
            needs_codec: false,
        }
    }

    /// Marks the parameter as requiring a codec.
    #[must_use]
    pub fn with_codec(mut self) -> Self {
        self.needs_codec = true;
        self
    }
}

/// Mapping from group to the ordered descriptors assigned to it.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    entries: HashMap<ParameterGroup, Vec<ParamSpec>>,
}

impl ClassificationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor to its group.
    pub fn push(&mut self, spec: ParamSpec) {
        self.entries.entry(spec.group).or_default().push(spec);
    }

    /// Returns the descriptors filed under `group`, in declared order.
    #[must_use]
    pub fn get(&self, group: ParameterGroup) -> &[ParamSpec] {
        self.entries.get(&group).map_or(&[], Vec::as_slice)
    }

    /// Whether at least one descriptor is filed under `group`.
    #[must_use]
    pub fn contains(&self, group: ParameterGroup) -> bool {
        !self.get(group).is_empty()
    }

    /// Returns the first descriptor filed under `group`.
    #[must_use]
    pub fn first(&self, group: ParameterGroup) -> Option<&ParamSpec> {
        self.get(group).first()
    }
}
