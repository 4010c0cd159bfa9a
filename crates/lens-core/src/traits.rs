use async_trait::async_trait;
use serde_json::Value;

use crate::error::NormalizedError;

/// Executes a read-only query somewhere else and hands back the opaque result.
///
/// The production implementation forwards to the remote HTTP service; tests
/// substitute in-memory executors to count calls and script outcomes.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `query` and return the remote `result` payload unchanged.
    async fn execute(&self, query: &str) -> Result<Value, NormalizedError>;
}
