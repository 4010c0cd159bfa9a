use serde_json::Value;

use lens_core::{NormalizedError, ToolInvocation};

use crate::tools::{ToolCatalog, ToolDescriptor};

/// Single point of contact for the local peer: lists tools and dispatches calls.
pub struct ToolRouter {
    catalog: ToolCatalog,
}

impl ToolRouter {
    #[must_use]
    pub fn new(catalog: ToolCatalog) -> Self {
        Self { catalog }
    }

    /// Every registered tool. Idempotent and side-effect free.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.catalog.descriptors()
    }

    /// Look up the tool and hand it the arguments. Unknown names fail before
    /// any handler runs; handler results and errors pass through untouched.
    pub async fn call_tool(&self, invocation: ToolInvocation) -> Result<Value, NormalizedError> {
        let Some(handler) = self.catalog.handler(&invocation.name) else {
            tracing::warn!(tool = %invocation.name, "call to unregistered tool");
            return Err(NormalizedError::method_not_found(&invocation.name));
        };

        let result = handler.call(invocation.arguments).await;
        if let Err(err) = &result {
            tracing::warn!(tool = %invocation.name, kind = %err.kind, "tool call failed: {err}");
        }
        result
    }
}
