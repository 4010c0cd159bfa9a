use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lens_core::{NormalizedError, EXECUTE_QUERY};

/// Method invoked on the remote peer for every query.
pub const REMOTE_METHOD: &str = "tools/call";

/// Outbound JSON-RPC request sent to the remote service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteEnvelope<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: RemoteParams<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteParams<'a> {
    pub name: &'static str,
    pub arguments: RemoteArguments<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteArguments<'a> {
    pub query: &'a str,
}

impl<'a> RemoteEnvelope<'a> {
    pub fn execute_query(id: u64, query: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: REMOTE_METHOD,
            params: RemoteParams {
                name: EXECUTE_QUERY,
                arguments: RemoteArguments { query },
            },
        }
    }
}

/// Hands out correlation ids: seeded from the wall clock in milliseconds,
/// then strictly increasing within the process.
#[derive(Debug)]
pub struct RequestIds {
    next: AtomicU64,
}

impl RequestIds {
    #[must_use]
    pub fn new() -> Self {
        let seed = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        Self::starting_at(seed)
    }

    #[must_use]
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for RequestIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Error object reported by the remote peer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteError {
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Classified remote response.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteResponse {
    Result(Value),
    Error(RemoteError),
}

impl RemoteResponse {
    /// Parse a response body. Anything but a JSON object carrying `result` or
    /// `error` is a transport fault. `error` wins over `result`; an explicit
    /// `null` result is kept, a `null` error counts as no error.
    pub fn parse(body: &[u8]) -> Result<Self, NormalizedError> {
        let value: Value = serde_json::from_slice(body).map_err(malformed)?;
        let Value::Object(mut fields) = value else {
            return Err(NormalizedError::transport_fault(
                "malformed response from remote server: body is not a JSON object",
            ));
        };

        match fields.remove("error") {
            Some(Value::Null) | None => {}
            Some(error @ Value::Object(_)) => {
                let error: RemoteError = serde_json::from_value(error).map_err(malformed)?;
                return Ok(Self::Error(error));
            }
            Some(_) => {
                return Err(NormalizedError::transport_fault(
                    "malformed response from remote server: error is not an object",
                ))
            }
        }

        fields.remove("result").map(Self::Result).ok_or_else(|| {
            NormalizedError::transport_fault(
                "malformed response from remote server: neither result nor error present",
            )
        })
    }

    /// Collapse into the pipeline result.
    pub fn into_result(self) -> Result<Value, NormalizedError> {
        match self {
            Self::Result(value) => Ok(value),
            Self::Error(error) => Err(NormalizedError::remote_fault(format!(
                "remote server error: {}",
                error.message
            ))),
        }
    }
}

fn malformed(e: serde_json::Error) -> NormalizedError {
    NormalizedError::transport_fault(format!("malformed response from remote server: {e}"))
}

#[cfg(test)]
mod tests {
    use lens_core::ErrorKind;

    use super::*;

    #[test]
    fn envelope_wire_shape() {
        let envelope = RemoteEnvelope::execute_query(1_700_000_000_000, "SELECT 1");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1_700_000_000_000_u64,
                "method": "tools/call",
                "params": {
                    "name": "execute_query",
                    "arguments": { "query": "SELECT 1" }
                }
            })
        );
    }

    #[test]
    fn ids_strictly_increase() {
        let ids = RequestIds::starting_at(41);
        assert_eq!(ids.next_id(), 41);
        assert_eq!(ids.next_id(), 42);
        assert_eq!(ids.next_id(), 43);
    }

    #[test]
    fn clock_seeded_ids_are_recent() {
        let before = u64::try_from(Utc::now().timestamp_millis()).unwrap();
        let id = RequestIds::new().next_id();
        assert!(id >= before);
    }

    #[test]
    fn result_kept_verbatim() {
        for payload in [
            serde_json::json!(null),
            serde_json::json!({}),
            serde_json::json!([]),
            serde_json::json!({"rows": [{"id": 1, "name": "ACME"}], "count": 1}),
            serde_json::json!("text"),
        ] {
            let body = serde_json::to_vec(&serde_json::json!({ "result": payload })).unwrap();
            let parsed = RemoteResponse::parse(&body).unwrap();
            assert_eq!(parsed, RemoteResponse::Result(payload));
        }
    }

    #[test]
    fn error_field_wins() {
        let body = br#"{"result": {}, "error": {"code": -32000, "message": "only SELECT allowed"}}"#;
        let err = RemoteResponse::parse(body).unwrap().into_result().unwrap_err();
        assert_eq!(err.kind, ErrorKind::RemoteFault);
        assert!(err.message.contains("only SELECT allowed"));
    }

    #[test]
    fn null_error_falls_back_to_result() {
        let body = br#"{"jsonrpc": "2.0", "id": 7, "result": [1, 2], "error": null}"#;
        let value = RemoteResponse::parse(body).unwrap().into_result().unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));
    }

    #[test]
    fn malformed_bodies_are_transport_faults() {
        for body in [
            &b"{}"[..],
            b"not json",
            b"",
            b"[1, 2, 3]",
            br#"[{"rows": [1]}]"#,
            b"[null]",
            b"[5, null]",
            b"\"result\"",
            br#"{"jsonrpc": "2.0", "id": 1}"#,
            br#"{"error": {"code": 1}}"#,
            br#"{"error": ["only SELECT allowed"]}"#,
        ] {
            let err = RemoteResponse::parse(body).unwrap_err();
            assert_eq!(err.kind, ErrorKind::TransportFault, "body: {body:?}");
        }
    }
}
