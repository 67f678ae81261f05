//! RFC 7386 JSON Merge Patch.
//!
//! Pure functions with no side effects, used by the session update path to
//! merge an incoming partial document into the stored one.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced while parsing a merge-patch document.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("invalid merge patch: {0}")]
    InvalidPatch(#[from] serde_json::Error),
}

/// Parse a merge-patch document from the raw request body.
pub fn parse_patch(text: &str) -> Result<Value, PatchError> {
    Ok(serde_json::from_str(text)?)
}

/// Apply an RFC 7386 merge patch to a base document.
///
/// Object members in the patch overwrite or insert the corresponding base
/// member, recursing into nested objects. An explicit `null` deletes the
/// member. Any non-object patch value, arrays included, replaces the base
/// value wholesale.
pub fn apply_merge_patch(base: &Value, patch: &Value) -> Value {
    let Value::Object(patch_members) = patch else {
        return patch.clone();
    };

    let mut merged = match base {
        Value::Object(members) => members.clone(),
        _ => Map::new(),
    };

    for (name, patch_value) in patch_members {
        if patch_value.is_null() {
            merged.remove(name);
        } else {
            let base_value = merged.get(name).cloned().unwrap_or(Value::Null);
            merged.insert(name.clone(), apply_merge_patch(&base_value, patch_value));
        }
    }

    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_null_deletes_and_new_key_inserts() {
        let base = json!({"userName": "alice"});
        let patch = json!({"userName": null, "favoriteColor": "blue"});
        assert_eq!(
            apply_merge_patch(&base, &patch),
            json!({"favoriteColor": "blue"})
        );
    }

    #[test]
    fn test_nested_objects_merge_recursively() {
        let base = json!({"prefs": {"theme": "dark", "lang": "en"}, "userName": "alice"});
        let patch = json!({"prefs": {"theme": "light"}});
        assert_eq!(
            apply_merge_patch(&base, &patch),
            json!({"prefs": {"theme": "light", "lang": "en"}, "userName": "alice"})
        );
    }

    #[test]
    fn test_arrays_are_replaced_wholesale() {
        let base = json!({"tags": ["a", "b", "c"]});
        let patch = json!({"tags": ["d"]});
        assert_eq!(apply_merge_patch(&base, &patch), json!({"tags": ["d"]}));
    }

    #[test]
    fn test_scalar_patch_replaces_base_entirely() {
        let base = json!({"userName": "alice"});
        let patch = json!("gone");
        assert_eq!(apply_merge_patch(&base, &patch), json!("gone"));
    }

    #[test]
    fn test_object_patch_over_scalar_base() {
        let base = json!(42);
        let patch = json!({"userName": "bob"});
        assert_eq!(apply_merge_patch(&base, &patch), json!({"userName": "bob"}));
    }

    #[test]
    fn test_null_for_absent_member_is_a_no_op() {
        let base = json!({"userName": "alice"});
        let patch = json!({"missing": null});
        assert_eq!(apply_merge_patch(&base, &patch), base);
    }

    #[test]
    fn test_parse_patch_rejects_invalid_json() {
        assert!(matches!(
            parse_patch("{not json"),
            Err(PatchError::InvalidPatch(_))
        ));
    }
}
