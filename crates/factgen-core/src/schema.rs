use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Target;

/// Structural problem found in a targets document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// JSON pointer of the offending instance.
    pub path: String,
    pub message: String,
}

/// Emit the JSON Schema for `targets.json`.
pub fn targets_json_schema() -> RootSchema {
    schema_for!(Vec<Target>)
}

/// Validate a targets document against [`targets_json_schema`].
///
/// Returns every violation found; an empty list means the document is
/// structurally valid.
pub fn validate_targets_json(document: &Value) -> Result<Vec<SchemaIssue>> {
    let schema = serde_json::to_value(targets_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| Error::schema("/", err.to_string()))?;

    let mut issues = Vec::new();
    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            issues.push(SchemaIssue {
                path: normalized_json_pointer(&error.instance_path.to_string()),
                message: error.to_string(),
            });
        }
    }

    Ok(issues)
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn well_formed_corpus_has_no_issues() {
        let document = json!([
            {"id": 1, "rules": [{"attr": "dev", "op": "+", "values": ["ok", "oth"]}]},
            {"rules": [{"attr": "pos", "values": [1, 2]}]}
        ]);
        let issues = validate_targets_json(&document).expect("validate");
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn integers_beyond_i64_are_accepted() {
        let document: Value = serde_json::from_str(
            r#"[{"rules": [{"attr": "uid", "values": [18446744073709551615, 1]}]}]"#,
        )
        .expect("parse document");
        let issues = validate_targets_json(&document).expect("validate");
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn missing_attr_is_reported_at_rule_path() {
        let document = json!([{"rules": [{"values": ["a"]}]}]);
        let issues = validate_targets_json(&document).expect("validate");
        assert!(!issues.is_empty());
        assert_eq!(issues[0].path, "/0/rules/0");
    }

    #[test]
    fn non_array_root_is_reported_at_root() {
        let issues = validate_targets_json(&json!({"rules": []})).expect("validate");
        assert_eq!(issues[0].path, "/");
    }
}
