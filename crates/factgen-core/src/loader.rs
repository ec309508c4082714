use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::Target;
use crate::schema::validate_targets_json;

/// Read and parse a targets corpus from disk.
pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let contents = std::fs::read_to_string(path)?;
    let targets = parse_targets(&contents)?;
    info!(
        event = "targets_loaded",
        path = %path.display(),
        targets = targets.len()
    );
    Ok(targets)
}

/// Parse a targets corpus, validating it against the targets JSON Schema
/// before deserializing.
pub fn parse_targets(contents: &str) -> Result<Vec<Target>> {
    let document: Value =
        serde_json::from_str(contents).map_err(|err| Error::schema("/", err.to_string()))?;

    let issues = validate_targets_json(&document)?;
    if let Some(first) = issues.first() {
        debug!(event = "targets_invalid", issues = issues.len());
        let message = if issues.len() > 1 {
            format!("{} (and {} more issues)", first.message, issues.len() - 1)
        } else {
            first.message.clone()
        };
        return Err(Error::schema(first.path.clone(), message));
    }

    serde_json::from_value(document).map_err(|err| Error::schema("/", err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;

    #[test]
    fn parses_rules_in_file_order() {
        let targets = parse_targets(
            r#"[{"id": 7, "rules": [
                {"attr": "kws", "values": ["a", "b"]},
                {"attr": "pos", "op": "-", "values": [3]}
            ]}]"#,
        )
        .expect("parse targets");

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, Some(7));
        let rules = &targets[0].rules;
        assert_eq!(rules[0].attr, "kws");
        assert_eq!(rules[1].op.as_deref(), Some("-"));
        assert_eq!(rules[1].values, vec![Scalar::Int(3)]);
    }

    #[test]
    fn missing_rules_is_a_schema_error() {
        let err = parse_targets(r#"[{"id": 1}]"#).expect_err("missing rules");
        match err {
            Error::Schema { path, .. } => assert_eq!(path, "/0"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_json_is_a_schema_error() {
        let err = parse_targets("[{").expect_err("truncated json");
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = load_targets(Path::new("/nonexistent/factgen/targets.json"))
            .expect_err("missing file");
        assert!(matches!(err, Error::Io(_)));
    }
}
