use lens_core::ToolInvocation;
use lens_mcp::jsonrpc::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND};
use lens_mcp::{JsonRpcRequest, JsonRpcResponse};

use crate::app_state::AppState;

/// Name reported to the client in `initialize`.
pub const SERVER_NAME: &str = "company-lens-db";

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Handle one MCP JSON-RPC message from the local peer.
///
/// Returns `None` for notifications, which never get a response.
pub async fn handle_message(state: &AppState, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        tracing::debug!("Received MCP notification: {}", req.method);
        return None;
    }

    if req.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::error(
            req.response_id(),
            INVALID_REQUEST,
            format!("Unsupported jsonrpc version: {}", req.jsonrpc),
        ));
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => JsonRpcResponse::success(req.response_id(), serde_json::json!({})),
        "tools/list" => handle_tools_list(state, &req),
        "tools/call" => handle_tools_call(state, &req).await,
        _ => JsonRpcResponse::error(req.response_id(), METHOD_NOT_FOUND, "Method not found"),
    };
    Some(response)
}

fn handle_initialize(req: &JsonRpcRequest) -> JsonRpcResponse {
    JsonRpcResponse::success(
        req.response_id(),
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(state: &AppState, req: &JsonRpcRequest) -> JsonRpcResponse {
    let tools = state.tools.list_tools();
    JsonRpcResponse::success(req.response_id(), serde_json::json!({ "tools": tools }))
}

async fn handle_tools_call(state: &AppState, req: &JsonRpcRequest) -> JsonRpcResponse {
    let Some(params) = &req.params else {
        return JsonRpcResponse::error(req.response_id(), INVALID_PARAMS, "Missing params");
    };

    let invocation: ToolInvocation = match serde_json::from_value(params.clone()) {
        Ok(invocation) => invocation,
        Err(e) => {
            return JsonRpcResponse::error(
                req.response_id(),
                INVALID_PARAMS,
                format!("Invalid tools/call params: {e}"),
            )
        }
    };

    match state.tools.call_tool(invocation).await {
        Ok(value) => JsonRpcResponse::success(req.response_id(), value),
        Err(err) => JsonRpcResponse::from_error(req.response_id(), &err),
    }
}
