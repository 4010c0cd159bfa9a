use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of every failure the local peer can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The requested tool is not registered.
    MethodNotFound,
    /// The tool exists but the supplied arguments do not fit its schema.
    InvalidParams,
    /// The remote peer answered with an application-level `error`.
    RemoteFault,
    /// No well-formed exchange with the remote peer took place.
    TransportFault,
}

impl ErrorKind {
    /// Stable snake_case name, used in logs and in error `data` payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MethodNotFound => "method_not_found",
            Self::InvalidParams => "invalid_params",
            Self::RemoteFault => "remote_fault",
            Self::TransportFault => "transport_fault",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single error shape produced by the proxy pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl NormalizedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn method_not_found(tool_name: &str) -> Self {
        Self::new(ErrorKind::MethodNotFound, format!("Unknown tool: {tool_name}"))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    pub fn remote_fault(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteFault, message)
    }

    pub fn transport_fault(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportFault, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_message_only() {
        let err = NormalizedError::remote_fault("remote server error: only SELECT allowed");
        assert_eq!(err.to_string(), "remote server error: only SELECT allowed");
        assert_eq!(err.kind, ErrorKind::RemoteFault);
    }

    #[test]
    fn method_not_found_names_tool() {
        let err = NormalizedError::method_not_found("drop_table");
        assert_eq!(err.kind, ErrorKind::MethodNotFound);
        assert!(err.message.contains("drop_table"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_value(ErrorKind::TransportFault).unwrap();
        assert_eq!(json, serde_json::json!("transport_fault"));
        assert_eq!(ErrorKind::TransportFault.to_string(), "transport_fault");
    }
}
