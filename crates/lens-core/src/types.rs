use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NormalizedError;

/// Name of the one tool this proxy exposes.
pub const EXECUTE_QUERY: &str = "execute_query";

/// A single `tools/call` invocation from the local peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Arguments accepted by `execute_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryArgs {
    pub query: String,
}

impl QueryArgs {
    /// Extract the arguments from a raw `arguments` object.
    pub fn from_arguments(arguments: &Value) -> Result<Self, NormalizedError> {
        let query = arguments
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| NormalizedError::invalid_params("Missing 'query' parameter"))?;

        Ok(Self {
            query: query.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn invocation_defaults_arguments() {
        let call: ToolInvocation = serde_json::from_str(r#"{"name": "execute_query"}"#).unwrap();
        assert_eq!(call.name, EXECUTE_QUERY);
        assert_eq!(call.arguments, serde_json::json!({}));
    }

    #[test]
    fn query_args_extracted() {
        let args = QueryArgs::from_arguments(&serde_json::json!({"query": "SELECT 1"})).unwrap();
        assert_eq!(args.query, "SELECT 1");
    }

    #[test]
    fn query_args_reject_missing_or_non_string() {
        for arguments in [
            serde_json::json!({}),
            serde_json::json!({"query": 42}),
            serde_json::json!(null),
        ] {
            let err = QueryArgs::from_arguments(&arguments).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidParams);
        }
    }
}
