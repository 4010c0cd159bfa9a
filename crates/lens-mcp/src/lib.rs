pub mod jsonrpc;
pub mod router;
pub mod tools;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use router::ToolRouter;
pub use tools::{ExecuteQueryTool, ToolCatalog, ToolDescriptor, ToolHandler};
