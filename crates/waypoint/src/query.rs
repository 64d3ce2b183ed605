//! Query-string extractor.

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::extractor::FromRequest;
use crate::group::{ParamSpec, ParameterGroup};
use std::ops::Deref;
use std::sync::Arc;
use waypoint_codec::Decoder;

/// The parsed query string: an ordered multimap of name/value pairs.
///
/// Names may repeat; values are percent-decoded and `+` is treated as a
/// space, as in form encoding.
///
/// # Example
///
/// ```rust
/// use waypoint::QueryValues;
///
/// let values = QueryValues::parse("qv1=100&qv2=oops%3F&qv1=200").unwrap();
/// assert_eq!(values.get("qv1"), Some("100"));
/// assert_eq!(values.get("qv2"), Some("oops?"));
/// assert_eq!(values.get_all("qv1"), vec!["100", "200"]);
/// assert_eq!(values.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    pairs: Vec<(String, String)>,
}

impl QueryValues {
    /// Parses a raw query string.
    ///
    /// # Errors
    ///
    /// Returns a request-time mapping error when the query string is not
    /// valid form encoding.
    pub fn parse(query: &str) -> Result<Self, EndpointError> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query).map_err(|err| {
            EndpointError::invalid_mapping(format!("malformed query string: {err}"))
        })?;
        Ok(Self { pairs })
    }

    /// The first value for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All values for `name`, in query order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The number of name/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the query string carried no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates the pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Extractor handing the whole query multimap to the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(pub QueryValues);

impl Query {
    /// Consumes the wrapper and returns the parsed values.
    #[must_use]
    pub fn into_inner(self) -> QueryValues {
        self.0
    }
}

impl Deref for Query {
    type Target = QueryValues;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Query {
    fn spec() -> ParamSpec {
        ParamSpec::of::<Query>(ParameterGroup::Query)
    }

    fn from_request<D: Decoder>(
        cx: &mut RequestContext<'_>,
        _decoder: Option<&Arc<D>>,
    ) -> Result<Self, EndpointError> {
        Ok(Query(QueryValues::parse(cx.query_string())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Method;
    use waypoint_codec::NoCodec;

    fn request(uri: &str) -> crate::Request {
        http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_percent_decoding() {
        let values = QueryValues::parse("qv2=oops%3F").unwrap();
        assert_eq!(values.get("qv2"), Some("oops?"));
    }

    #[test]
    fn test_plus_is_space() {
        let values = QueryValues::parse("q=rust+lang").unwrap();
        assert_eq!(values.get("q"), Some("rust lang"));
    }

    #[test]
    fn test_repeated_names_keep_order() {
        let values = QueryValues::parse("tag=a&tag=b&other=c").unwrap();
        assert_eq!(values.get_all("tag"), vec!["a", "b"]);
        assert_eq!(values.get("tag"), Some("a"));
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_empty_query() {
        let values = QueryValues::parse("").unwrap();
        assert!(values.is_empty());
        assert_eq!(values.get("anything"), None);
    }

    #[test]
    fn test_from_request_reads_uri_query() {
        let request = request("/a?qv1=100&qv2=oops%3F");
        let mut cx = RequestContext::new(&request, Vec::new());

        let Query(values) = Query::from_request::<NoCodec>(&mut cx, None).unwrap();
        assert_eq!(values.get("qv1"), Some("100"));
        assert_eq!(values.get("qv2"), Some("oops?"));
    }

    #[test]
    fn test_from_request_without_query() {
        let request = request("/a");
        let mut cx = RequestContext::new(&request, Vec::new());

        let Query(values) = Query::from_request::<NoCodec>(&mut cx, None).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_iter() {
        let values = QueryValues::parse("a=1&b=2").unwrap();
        let collected: Vec<_> = values.iter().collect();
        assert_eq!(collected, vec![("a", "1"), ("b", "2")]);
    }
}
