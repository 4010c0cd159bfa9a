use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lens_core::{NormalizedError, QueryArgs, QueryExecutor, EXECUTE_QUERY};

/// Definition of an MCP tool exposed to the calling agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Descriptor for `execute_query`.
    #[must_use]
    pub fn execute_query() -> Self {
        Self {
            name: EXECUTE_QUERY.to_string(),
            description: "Fetch data from the company database with PostgreSQL. Only SELECT queries are allowed.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "SQL query to run (SELECT only)"
                    }
                },
                "required": ["query"]
            }),
        }
    }
}

/// Something that can answer a `tools/call` for one registered tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Value) -> Result<Value, NormalizedError>;
}

/// Handler for `execute_query`: validates arguments, then delegates.
pub struct ExecuteQueryTool {
    executor: Arc<dyn QueryExecutor>,
}

impl ExecuteQueryTool {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl ToolHandler for ExecuteQueryTool {
    async fn call(&self, arguments: Value) -> Result<Value, NormalizedError> {
        let args = QueryArgs::from_arguments(&arguments)?;
        self.executor.execute(&args.query).await
    }
}

struct ToolEntry {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Catalog of registered tools, keyed by name.
#[derive(Default)]
pub struct ToolCatalog {
    tools: BTreeMap<String, ToolEntry>,
}

impl ToolCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The production catalog: `execute_query` backed by `executor`.
    pub fn with_execute_query(executor: Arc<dyn QueryExecutor>) -> Self {
        let mut catalog = Self::new();
        catalog.register(
            ToolDescriptor::execute_query(),
            Arc::new(ExecuteQueryTool::new(executor)),
        );
        catalog
    }

    /// Register a tool, replacing any previous tool of the same name.
    pub fn register(&mut self, descriptor: ToolDescriptor, handler: Arc<dyn ToolHandler>) {
        self.tools.insert(
            descriptor.name.clone(),
            ToolEntry {
                descriptor,
                handler,
            },
        );
    }

    /// Descriptors in name order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor.clone()).collect()
    }

    pub fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).map(|t| Arc::clone(&t.handler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl QueryExecutor for Echo {
        async fn execute(&self, query: &str) -> Result<Value, NormalizedError> {
            Ok(serde_json::json!({ "echo": query }))
        }
    }

    #[test]
    fn execute_query_defined() {
        let catalog = ToolCatalog::with_execute_query(Arc::new(Echo));
        let tools = catalog.descriptors();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "execute_query");
        assert!(tools[0].description.contains("SELECT"));
    }

    #[test]
    fn tools_serialize() {
        let json = serde_json::to_string(&vec![ToolDescriptor::execute_query()]).unwrap();
        assert!(json.contains("execute_query"));
        assert!(json.contains("inputSchema"));
    }

    #[test]
    fn execute_query_requires_string_query() {
        let tool = ToolDescriptor::execute_query();
        assert_eq!(tool.input_schema["type"], "object");
        assert_eq!(tool.input_schema["properties"]["query"]["type"], "string");

        let required = tool.input_schema["required"].as_array().unwrap();
        let required_names: Vec<&str> = required.iter().filter_map(Value::as_str).collect();
        assert_eq!(required_names, vec!["query"]);
    }

    #[test]
    fn unknown_name_has_no_handler() {
        let catalog = ToolCatalog::with_execute_query(Arc::new(Echo));
        assert!(catalog.handler("execute_query").is_some());
        assert!(catalog.handler("drop_tables").is_none());
    }

    #[tokio::test]
    async fn execute_query_tool_delegates() {
        let tool = ExecuteQueryTool::new(Arc::new(Echo));
        let result = tool
            .call(serde_json::json!({ "query": "SELECT 1" }))
            .await
            .unwrap();
        assert_eq!(result, serde_json::json!({ "echo": "SELECT 1" }));
    }
}
