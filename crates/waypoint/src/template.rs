//! Path template parsing and per-request segment extraction.
//!
//! A template marks parameter slots with `/:`, as in
//! `/:assortment/filters/:id`. Parsing scans the template once and records,
//! for each slot, the byte offset just past the `/` *relative to the end of
//! the previous slot's segment*. Extraction replays those offsets against a
//! request path, slicing out the literal segment values.
//!
//! The parameter name after the `:` is never consumed — binding is
//! positional — so an empty name (`/:`) is a legal slot.

/// Marks the start of a parameter slot inside a template.
const PARAMETER_MARK: &str = "/:";

/// Returns the relative byte offsets of the parameter slots in `template`.
///
/// # Example
///
/// ```rust
/// use waypoint::template::segment_offsets;
///
/// assert_eq!(segment_offsets("/abc/def"), Vec::<usize>::new());
/// assert_eq!(segment_offsets("/a/:bcd/ef/:"), vec![3, 4]);
/// ```
#[must_use]
pub fn segment_offsets(template: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut from = 0;
    loop {
        let Some(found) = template[from..].find(PARAMETER_MARK) else {
            return offsets;
        };
        let offset = found + 1;
        offsets.push(offset);
        from += offset;

        // Skip past the rest of this slot's segment before resuming. The
        // last segment may have no trailing separator.
        let Some(end) = template[from..].find('/') else {
            return offsets;
        };
        from += end;
    }
}

/// Slices the parameter values out of a request path using the offsets
/// recorded by [`segment_offsets`].
///
/// Each value runs from its offset to the next `/` or the end of the path.
/// A path shorter than the template yields fewer values; the caller's arity
/// check reports the mismatch.
#[must_use]
pub fn segment_values<'p>(path: &'p str, offsets: &[usize]) -> Vec<&'p str> {
    let mut values = Vec::with_capacity(offsets.len());
    let mut from = 0;
    for &offset in offsets {
        let start = from + offset;
        let Some(rest) = path.get(start..) else {
            return values;
        };
        match rest.find('/') {
            None => {
                values.push(rest);
                return values;
            }
            Some(end) => {
                values.push(&rest[..end]);
                from = start + end;
            }
        }
    }
    values
}

/// A parsed path template: the raw string plus its slot offsets.
///
/// # Example
///
/// ```rust
/// use waypoint::template::PathTemplate;
///
/// let template = PathTemplate::parse("/some/part/:id/:assortment/here");
/// assert_eq!(template.arity(), 2);
/// assert_eq!(
///     template.extract("/some/part/666/POOW/here"),
///     vec!["666", "POOW"],
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    offsets: Vec<usize>,
}

impl PathTemplate {
    /// Parses a template. Malformed input never fails here: it just yields
    /// fewer slots, and the handler-arity check surfaces the mismatch.
    #[must_use]
    pub fn parse(template: impl Into<String>) -> Self {
        let raw = template.into();
        let offsets = segment_offsets(&raw);
        Self { raw, offsets }
    }

    /// Returns the raw template string.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the number of parameter slots.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the recorded slot offsets.
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Extracts the slot values from a request path.
    #[must_use]
    pub fn extract<'p>(&self, path: &'p str) -> Vec<&'p str> {
        segment_values(path, &self.offsets)
    }
}
