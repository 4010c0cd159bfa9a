use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;

use lens_mcp::jsonrpc::{INVALID_REQUEST, PARSE_ERROR};
use lens_mcp::{JsonRpcRequest, JsonRpcResponse};

use crate::app_state::AppState;
use crate::handlers;

/// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`.
///
/// Every request runs on its own task, so a slow remote call only delays its
/// own response. Responses are written one line at a time in completion
/// order. Returns once the reader hits end of input and every in-flight
/// request has been answered.
pub async fn serve<R, W>(state: &AppState, reader: R, writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::try_join!(read_loop(state, reader, tx), write_loop(rx, writer))?;
    Ok(())
}

async fn read_loop<R>(
    state: &AppState,
    mut reader: R,
    tx: mpsc::UnboundedSender<JsonRpcResponse>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match decode(&line) {
            Ok(req) => {
                tracing::debug!(method = %req.method, id = ?req.id, "received request");
                let state = state.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(resp) = handlers::handle_message(&state, req).await {
                        // The writer only goes away when the transport is closing.
                        let _ = tx.send(resp);
                    }
                });
            }
            Err(resp) => {
                let _ = tx.send(resp);
            }
        }
    }

    tracing::info!("Local transport closed");
    Ok(())
}

async fn write_loop<W>(
    rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    mut writer: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut responses = UnboundedReceiverStream::new(rx);

    while let Some(resp) = responses.next().await {
        let mut bytes = serde_json::to_vec(&resp)?;
        bytes.push(b'\n');
        writer.write_all(&bytes).await?;
        writer.flush().await?;
    }

    writer.flush().await
}

/// Parse one line into a request, or into the error response it deserves.
fn decode(line: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(line).map_err(|e| {
        tracing::warn!("Failed to parse JSON-RPC message: {e}");
        JsonRpcResponse::error(Value::Null, PARSE_ERROR, format!("Parse error: {e}"))
    })?;

    if !value.is_object() {
        tracing::warn!("JSON-RPC message is not an object");
        return Err(JsonRpcResponse::error(
            Value::Null,
            INVALID_REQUEST,
            "Invalid request: expected a JSON object",
        ));
    }

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!("Invalid JSON-RPC request: {e}");
        JsonRpcResponse::error(id, INVALID_REQUEST, format!("Invalid request: {e}"))
    })
}
