//! Shared types used across OR-AF modules
//!
//! Task parameters, task outputs and agent state all travel as JSON so that
//! the orchestrator can stay ignorant of each agent's own shapes.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::core::error::{OrafError, Result};

/// Open-ended task parameters (keyword arguments)
pub type Params = Map<String, Value>;

/// Arbitrary result of a task
pub type TaskOutput = Value;

/// An agent's key/value state bag
pub type State = Map<String, Value>;

/// Most recent result per `"<agent>:<task>"` pair
pub type Ledger = BTreeMap<String, TaskOutput>;

/// Build the ledger key for an (agent, task) pair
pub fn result_key(agent_name: &str, task: &str) -> String {
    format!("{}:{}", agent_name, task)
}

/// Parse a JSON object into task parameters.
///
/// An empty or blank string yields empty parameters.
pub fn parse_params(raw: &str) -> Result<Params> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Params::new());
    }

    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(OrafError::Other(format!(
            "Task parameters must be a JSON object, got: {}",
            other
        ))),
    }
}

/// Convert any JSON value into parameters, wrapping non-objects under `value`
pub fn params_from_value(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Params::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_key() {
        assert_eq!(result_key("echo", "ping"), "echo:ping");
    }

    #[test]
    fn test_parse_params_object() {
        let params = parse_params(r#"{"data": [1, 2, 3]}"#).unwrap();
        assert_eq!(params.get("data"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_parse_params_blank() {
        assert!(parse_params("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_params_rejects_non_object() {
        assert!(parse_params("[1, 2]").is_err());
        assert!(parse_params("{not json").is_err());
    }

    #[test]
    fn test_params_from_value_wraps_scalars() {
        let params = params_from_value(json!(42));
        assert_eq!(params.get("value"), Some(&json!(42)));

        let params = params_from_value(json!({"a": 1}));
        assert_eq!(params.get("a"), Some(&json!(1)));
    }
}
