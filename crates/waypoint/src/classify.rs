//! Build-time handler classification.
//!
//! Walks the handler's input and output descriptor manifests and files
//! each descriptor into the classification table, enforcing the mapping
//! rules: path inputs come first and match the template's slot count, the
//! non-path request groups and every response group are singletons. Every
//! violation is accumulated — classification never aborts early across
//! groups, so a multiply-wrong handler reports all of its problems.

use crate::error::BuildError;
use crate::group::{ClassificationTable, ParamSpec, ParameterGroup};

/// The product of classifying one handler against one template.
#[derive(Debug, Clone, Default)]
pub(crate) struct Classification {
    pub table: ClassificationTable,
    /// Non-path request groups, in the handler's declared input order.
    pub request_order: Vec<ParameterGroup>,
    /// Response groups, in the handler's declared output order.
    pub response_order: Vec<ParameterGroup>,
    pub errors: Vec<BuildError>,
}

pub(crate) fn classify(
    inputs: &[ParamSpec],
    outputs: &[ParamSpec],
    path_arity: usize,
) -> Classification {
    let mut classification = Classification::default();
    classify_inputs(&mut classification, inputs, path_arity);
    classify_outputs(&mut classification, outputs);
    classification
}

fn classify_inputs(classification: &mut Classification, inputs: &[ParamSpec], path_arity: usize) {
    if inputs.len() < path_arity {
        classification.errors.push(BuildError::invalid_mapping(format!(
            "unexpected amount of path parameters: {path_arity} template slot(s), {} handler input(s)",
            inputs.len(),
        )));
        return;
    }

    for spec in &inputs[..path_arity] {
        if spec.group == ParameterGroup::Path {
            classification.table.push(*spec);
        } else {
            classification.errors.push(BuildError::unsupported_type(format!(
                "{} cannot bind a path segment",
                spec.type_name,
            )));
        }
    }

    for (position, spec) in inputs.iter().enumerate().skip(path_arity) {
        match spec.group {
            ParameterGroup::Path => {
                classification.errors.push(BuildError::invalid_mapping(format!(
                    "path parameter at position {position} has no matching template slot",
                )));
            }
            ParameterGroup::Query
            | ParameterGroup::Header
            | ParameterGroup::Cookie
            | ParameterGroup::Body => {
                file_singleton(classification, *spec, duplicate_input_context(spec.group));
            }
            _ => {
                classification.errors.push(BuildError::unsupported_type(format!(
                    "{} cannot be a handler input",
                    spec.type_name,
                )));
            }
        }
    }
}

fn classify_outputs(classification: &mut Classification, outputs: &[ParamSpec]) {
    for spec in outputs {
        match spec.group {
            ParameterGroup::ResponseStatus
            | ParameterGroup::ResponseError
            | ParameterGroup::ResponseBody
            | ParameterGroup::ResponseHeader
            | ParameterGroup::ResponseCookie => {
                file_singleton(classification, *spec, duplicate_output_context(spec.group));
            }
            _ => {
                classification.errors.push(BuildError::unsupported_type(format!(
                    "{} cannot be a handler return value",
                    spec.type_name,
                )));
            }
        }
    }
}

fn file_singleton(classification: &mut Classification, spec: ParamSpec, duplicate: &'static str) {
    if classification.table.contains(spec.group) {
        classification
            .errors
            .push(BuildError::invalid_mapping(duplicate));
        return;
    }
    classification.table.push(spec);
    match spec.group {
        ParameterGroup::Query
        | ParameterGroup::Header
        | ParameterGroup::Cookie
        | ParameterGroup::Body => classification.request_order.push(spec.group),
        _ => classification.response_order.push(spec.group),
    }
}

fn duplicate_input_context(group: ParameterGroup) -> &'static str {
    match group {
        ParameterGroup::Header => "unable to map headers to more than one handler input",
        ParameterGroup::Query => "unable to map query values to more than one handler input",
        ParameterGroup::Cookie => "unable to map cookies to more than one handler input",
        _ => "unable to map the request body to more than one handler input",
    }
}

fn duplicate_output_context(group: ParameterGroup) -> &'static str {
    match group {
        ParameterGroup::ResponseStatus => "unable to map multiple response status codes",
        ParameterGroup::ResponseError => "unable to map multiple error return values",
        ParameterGroup::ResponseHeader => "unable to map multiple response header returns",
        ParameterGroup::ResponseCookie => "unable to map multiple response cookie returns",
        _ => "unable to map the response body to multiple return values",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildErrorKind;

    fn spec(group: ParameterGroup) -> ParamSpec {
        ParamSpec::of::<()>(group)
    }

    #[test]
    fn test_happy_path_classification() {
        let inputs = [
            spec(ParameterGroup::Path),
            spec(ParameterGroup::Path),
            spec(ParameterGroup::Query),
            spec(ParameterGroup::Header),
            spec(ParameterGroup::Body),
            spec(ParameterGroup::Cookie),
        ];
        let outputs = [
            spec(ParameterGroup::ResponseStatus),
            spec(ParameterGroup::ResponseBody),
            spec(ParameterGroup::ResponseError),
        ];

        let classification = classify(&inputs, &outputs, 2);

        assert!(classification.errors.is_empty());
        assert_eq!(classification.table.get(ParameterGroup::Path).len(), 2);
        assert_eq!(
            classification.request_order,
            vec![
                ParameterGroup::Query,
                ParameterGroup::Header,
                ParameterGroup::Body,
                ParameterGroup::Cookie
            ]
        );
        assert_eq!(
            classification.response_order,
            vec![
                ParameterGroup::ResponseStatus,
                ParameterGroup::ResponseBody,
                ParameterGroup::ResponseError
            ]
        );
    }

    #[test]
    fn test_too_few_inputs_is_invalid_mapping() {
        let classification = classify(&[], &[], 1);

        assert_eq!(classification.errors.len(), 1);
        assert_eq!(
            classification.errors[0].kind(),
            BuildErrorKind::InvalidMapping
        );
        assert!(classification.errors[0]
            .context()
            .contains("unexpected amount of path parameters"));
    }

    #[test]
    fn test_non_path_tag_in_path_position_is_unsupported_type() {
        let inputs = [spec(ParameterGroup::Header)];
        let classification = classify(&inputs, &[], 1);

        assert_eq!(classification.errors.len(), 1);
        assert_eq!(
            classification.errors[0].kind(),
            BuildErrorKind::UnsupportedType
        );
    }

    #[test]
    fn test_path_tag_beyond_template_slots_is_invalid_mapping() {
        let inputs = [spec(ParameterGroup::Path), spec(ParameterGroup::Path)];
        let classification = classify(&inputs, &[], 1);

        assert_eq!(classification.errors.len(), 1);
        assert_eq!(
            classification.errors[0].kind(),
            BuildErrorKind::InvalidMapping
        );
        assert!(classification.errors[0].context().contains("position 1"));
    }

    #[test]
    fn test_duplicate_request_singletons_accumulate() {
        let inputs = [
            spec(ParameterGroup::Header),
            spec(ParameterGroup::Header),
            spec(ParameterGroup::Query),
            spec(ParameterGroup::Query),
        ];
        let classification = classify(&inputs, &[], 0);

        assert_eq!(classification.errors.len(), 2);
        for error in &classification.errors {
            assert_eq!(error.kind(), BuildErrorKind::InvalidMapping);
        }
    }

    #[test]
    fn test_duplicate_response_singletons() {
        let outputs = [
            spec(ParameterGroup::ResponseStatus),
            spec(ParameterGroup::ResponseStatus),
            spec(ParameterGroup::ResponseHeader),
            spec(ParameterGroup::ResponseHeader),
        ];
        let classification = classify(&[], &outputs, 0);

        assert_eq!(classification.errors.len(), 2);
        assert!(classification.errors[0]
            .context()
            .contains("multiple response status codes"));
        assert!(classification.errors[1]
            .context()
            .contains("multiple response header returns"));
    }

    #[test]
    fn test_zero_arity_template_accepts_no_path_inputs() {
        let inputs = [spec(ParameterGroup::Query)];
        let classification = classify(&inputs, &[], 0);
        assert!(classification.errors.is_empty());
        assert!(!classification.table.contains(ParameterGroup::Path));
    }
}
