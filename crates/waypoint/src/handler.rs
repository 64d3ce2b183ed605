//! The handler abstraction.
//!
//! Any plain function or closure whose parameters implement
//! [`FromRequest`] and whose return shape implements [`IntoParts`] is a
//! [`Handler`]. The trait exposes two things: a descriptor manifest of the
//! inputs and outputs (walked at build time to classify the handler), and
//! an invocation path that extracts each argument in declared order and
//! calls the function (run per request by the compiled processor).

use crate::context::RequestContext;
use crate::error::EndpointError;
use crate::extractor::FromRequest;
use crate::group::ParamSpec;
use crate::response::IntoParts;
use std::sync::Arc;
use waypoint_codec::Decoder;

/// A bindable request handler.
///
/// Implemented for `Fn` types of arity 0 through 8. `Args` is the tuple of
/// input types; it is inferred, never written by hand.
pub trait Handler<Args>: Clone + Send + Sync + 'static {
    /// The handler's return shape.
    type Output: IntoParts;

    /// Descriptors of the handler's inputs, in declared order.
    fn input_specs() -> Vec<ParamSpec>;

    /// Descriptors of the handler's outputs, in declared order.
    fn output_specs() -> Vec<ParamSpec> {
        <Self::Output as IntoParts>::specs()
    }

    /// Extracts every argument in declared order and calls the function.
    ///
    /// # Errors
    ///
    /// Returns the first extraction failure; the function is not called.
    fn invoke<D: Decoder>(
        &self,
        cx: &mut RequestContext<'_>,
        decoder: Option<&Arc<D>>,
    ) -> Result<Self::Output, EndpointError>;
}

macro_rules! impl_handler_for_fn {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Handler<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out + Clone + Send + Sync + 'static,
            Out: IntoParts,
            $($arg: FromRequest,)*
        {
            type Output = Out;

            fn input_specs() -> Vec<ParamSpec> {
                vec![$($arg::spec()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn invoke<D: Decoder>(
                &self,
                cx: &mut RequestContext<'_>,
                decoder: Option<&Arc<D>>,
            ) -> Result<Self::Output, EndpointError> {
                $(let $arg = $arg::from_request(cx, decoder)?;)*
                Ok((self)($($arg),*))
            }
        }
    };
}

impl_handler_for_fn!();
impl_handler_for_fn!(A1);
impl_handler_for_fn!(A1, A2);
impl_handler_for_fn!(A1, A2, A3);
impl_handler_for_fn!(A1, A2, A3, A4);
impl_handler_for_fn!(A1, A2, A3, A4, A5);
impl_handler_for_fn!(A1, A2, A3, A4, A5, A6);
impl_handler_for_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_handler_for_fn!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ParameterGroup;
    use crate::header::Headers;
    use crate::path::Path;
    use crate::query::Query;
    use bytes::Bytes;
    use http::{Method, StatusCode};
    use waypoint_codec::NoCodec;

    fn specs_of<H: Handler<Args>, Args>(_handler: &H) -> (Vec<ParamSpec>, Vec<ParamSpec>) {
        (H::input_specs(), H::output_specs())
    }

    #[test]
    fn test_input_specs_follow_declared_order() {
        let handler = |Path(_): Path<String>, Query(_): Query, Headers(_): Headers| ();
        let (inputs, outputs) = specs_of(&handler);

        let groups: Vec<_> = inputs.iter().map(|spec| spec.group).collect();
        assert_eq!(
            groups,
            vec![
                ParameterGroup::Path,
                ParameterGroup::Query,
                ParameterGroup::Header
            ]
        );
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_output_specs_for_tuple_return() {
        let handler = || (StatusCode::OK, String::new());
        let (inputs, outputs) = specs_of(&handler);

        assert!(inputs.is_empty());
        assert_eq!(outputs[0].group, ParameterGroup::ResponseStatus);
        assert_eq!(outputs[1].group, ParameterGroup::ResponseBody);
    }

    #[test]
    fn test_invoke_extracts_in_order() {
        let request = http::Request::builder()
            .method(Method::GET)
            .uri("/some/part/666/POOW/here")
            .body(Bytes::new())
            .unwrap();
        let mut cx = RequestContext::new(&request, vec!["666", "POOW"]);

        let handler = |Path(id): Path<u16>, Path(assortment): Path<String>| {
            assert_eq!(id, 666);
            assert_eq!(assortment, "POOW");
        };

        handler.invoke::<NoCodec>(&mut cx, None).unwrap();
    }

    #[test]
    fn test_invoke_short_circuits_on_extraction_error() {
        let request = http::Request::builder()
            .method(Method::GET)
            .uri("/abc")
            .body(Bytes::new())
            .unwrap();
        let mut cx = RequestContext::new(&request, vec!["abc"]);

        let handler = |Path(_): Path<u16>| -> () { panic!("handler must not run") };
        assert!(handler.invoke::<NoCodec>(&mut cx, None).is_err());
    }
}
