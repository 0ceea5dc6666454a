//! Extraction of IAM statements from classified policy fragments.
//!
//! Accepted fragment shapes:
//! - a policy document, `{"Statement": <statement> | [<statement>, ...]}`;
//! - a bare statement object;
//! - an array of statements.
use apprun_model::PolicyStatement;
use serde_json::Value;
use tracing::warn;

/// Valid statements of one fragment. Malformed statements are skipped with a warning.
pub fn statements(key: &str, fragment: &Value) -> Vec<PolicyStatement> {
    let candidates = match candidates(fragment) {
        Some(c) => c,
        None => {
            warn!(key, "skipping IAM policy fragment that is neither a statement, a list of statements nor a policy document");
            return Vec::new();
        }
    };

    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match PolicyStatement::from_json(value) {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                warn!(key, index, error = %e, "skipping malformed IAM policy statement");
                None
            }
        })
        .collect()
}

fn candidates(fragment: &Value) -> Option<Vec<&Value>> {
    match fragment {
        Value::Object(map) => match map.get("Statement") {
            Some(Value::Array(items)) => Some(items.iter().collect()),
            Some(single @ Value::Object(_)) => Some(vec![single]),
            Some(_) => None,
            None => Some(vec![fragment]),
        },
        Value::Array(items) => Some(items.iter().collect()),
        _ => None,
    }
}
