//! Structural validation of untyped result lists.
//!
//! Result lists sometimes arrive as JSON from outer layers (UI bridges,
//! saved transcripts). [`parse_results`] checks the shape field by field and
//! reports the first violation as a [`ResultShapeError`] before handing the
//! list to serde.

use crate::core::error::ResultShapeError;
use crate::execution::value_objects::ModelResult;
use serde_json::Value;

/// Check that `value` is a non-empty array of well-formed results and
/// deserialize it.
pub fn parse_results(value: &Value) -> Result<Vec<ModelResult>, ResultShapeError> {
    let items = match value {
        Value::Null => return Err(ResultShapeError::Missing),
        Value::Array(items) => items,
        _ => return Err(ResultShapeError::NotAnArray),
    };
    if items.is_empty() {
        return Err(ResultShapeError::Empty);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_result(index, item))
        .collect()
}

fn parse_result(index: usize, item: &Value) -> Result<ModelResult, ResultShapeError> {
    let Some(object) = item.as_object() else {
        return Err(ResultShapeError::NotAnObject { index });
    };

    let checks: [(&'static str, &'static str, fn(&Value) -> bool); 3] = [
        ("modelId", "string", Value::is_string),
        ("modelName", "string", Value::is_string),
        ("success", "boolean", Value::is_boolean),
    ];
    for (field, expected, is_valid) in checks {
        if !object.get(field).is_some_and(is_valid) {
            return Err(ResultShapeError::InvalidField {
                index,
                field,
                expected,
            });
        }
    }

    serde_json::from_value(item.clone()).map_err(|e| ResultShapeError::Malformed {
        index,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid(id: &str) -> Value {
        json!({
            "modelId": id,
            "modelName": id.to_uppercase(),
            "responseText": "Some text.",
            "success": true,
            "latencyMs": 1200,
            "timestamp": 1
        })
    }

    #[test]
    fn null_is_missing() {
        assert_eq!(parse_results(&Value::Null), Err(ResultShapeError::Missing));
    }

    #[test]
    fn non_array_is_rejected() {
        assert_eq!(
            parse_results(&json!({"modelId": "a"})),
            Err(ResultShapeError::NotAnArray)
        );
        assert_eq!(parse_results(&json!("x")), Err(ResultShapeError::NotAnArray));
    }

    #[test]
    fn empty_array_is_rejected() {
        assert_eq!(parse_results(&json!([])), Err(ResultShapeError::Empty));
    }

    #[test]
    fn missing_model_id_is_named() {
        let err = parse_results(&json!([valid("a"), {"modelName": "B", "success": true}]))
            .unwrap_err();
        assert_eq!(
            err,
            ResultShapeError::InvalidField {
                index: 1,
                field: "modelId",
                expected: "string"
            }
        );
    }

    #[test]
    fn non_boolean_success_is_named() {
        let err = parse_results(&json!([{"modelId": "a", "modelName": "A", "success": "yes"}]))
            .unwrap_err();
        assert!(err.to_string().contains("boolean success"));
    }

    #[test]
    fn non_object_element_is_rejected() {
        assert_eq!(
            parse_results(&json!([42])),
            Err(ResultShapeError::NotAnObject { index: 0 })
        );
    }

    #[test]
    fn wrong_optional_field_type_is_malformed() {
        let mut item = valid("a");
        item["latencyMs"] = json!("slow");
        let err = parse_results(&json!([item])).unwrap_err();
        assert!(matches!(err, ResultShapeError::Malformed { index: 0, .. }));
    }

    #[test]
    fn minimal_results_parse_with_defaults() {
        let results =
            parse_results(&json!([{"modelId": "a", "modelName": "A", "success": false}])).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].response_text, "");
        assert_eq!(results[0].latency_ms, 0);
    }

    #[test]
    fn valid_list_parses() {
        let results = parse_results(&json!([valid("a"), valid("b")])).unwrap();
        assert_eq!(results[1].model_name, "B");
        assert_eq!(results[0].latency_ms, 1200);
    }
}
