//! Conversions between `serde_json::Value` and store attribute values.

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use sessionmgr_core::storage::StoreError;

/// Encode a JSON document as a store attribute value.
pub fn json_to_attr(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attr).collect()),
        Value::Object(members) => AttributeValue::M(
            members
                .iter()
                .map(|(name, member)| (name.clone(), json_to_attr(member)))
                .collect(),
        ),
    }
}

/// Decode a store attribute value back into a JSON document.
pub fn attr_to_json(attr: &AttributeValue) -> Result<Value, StoreError> {
    match attr {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::L(items) => items.iter().map(attr_to_json).collect(),
        AttributeValue::M(members) => members
            .iter()
            .map(|(name, member)| Ok((name.clone(), attr_to_json(member)?)))
            .collect::<Result<serde_json::Map<_, _>, StoreError>>()
            .map(Value::Object),
        other => Err(StoreError::Serialization(format!(
            "unsupported attribute value: {other:?}"
        ))),
    }
}

fn parse_number(text: &str) -> Result<Value, StoreError> {
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::from(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Ok(Value::from(n));
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StoreError::Serialization(format!("unparseable numeric value: {text:?}")))
}

/// Extract a numeric attribute as i64.
pub fn attr_as_i64(attr: Option<&AttributeValue>, name: &str) -> Result<i64, StoreError> {
    attr.and_then(|a| a.as_n().ok())
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| StoreError::Serialization(format!("missing numeric attribute {name:?}")))
}
