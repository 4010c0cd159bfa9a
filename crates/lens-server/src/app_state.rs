use std::sync::Arc;

use lens_core::QueryExecutor;
use lens_mcp::{ToolCatalog, ToolRouter};

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolRouter>,
}

impl AppState {
    /// State exposing `execute_query` on top of `executor`.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            tools: Arc::new(ToolRouter::new(ToolCatalog::with_execute_query(executor))),
        }
    }
}
