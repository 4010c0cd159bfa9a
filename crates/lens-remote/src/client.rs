use std::error::Error as _;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

use lens_core::{NormalizedError, QueryExecutor};

use crate::config::RemoteConfig;
use crate::envelope::{RemoteEnvelope, RemoteResponse, RequestIds};

/// Forwards queries to the remote JSON-RPC service over HTTP.
pub struct RemoteClient {
    http: Client,
    config: RemoteConfig,
    ids: RequestIds,
}

impl RemoteClient {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            ids: RequestIds::new(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// One POST, one classification. No retries.
    pub async fn invoke(&self, query: &str) -> Result<Value, NormalizedError> {
        let id = self.ids.next_id();
        let envelope = RemoteEnvelope::execute_query(id, query);
        tracing::debug!(id, endpoint = %self.config.endpoint, "forwarding query to remote server");

        let resp = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&envelope)
            .send()
            .await
            .map_err(connection_error)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(id, status = status.as_u16(), "remote server returned an error status");
            return Err(NormalizedError::transport_fault(format!(
                "remote server returned HTTP status {}",
                status.as_u16()
            )));
        }

        let body = resp.bytes().await.map_err(connection_error)?;
        let outcome = RemoteResponse::parse(&body)?.into_result();
        if let Err(err) = &outcome {
            tracing::warn!(id, "remote server rejected the query: {err}");
        }
        outcome
    }
}

#[async_trait]
impl QueryExecutor for RemoteClient {
    async fn execute(&self, query: &str) -> Result<Value, NormalizedError> {
        self.invoke(query).await
    }
}

/// Flatten a reqwest error and its sources into one transport fault.
fn connection_error(err: reqwest::Error) -> NormalizedError {
    let mut message = format!("failed to reach remote server: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    NormalizedError::transport_fault(message)
}
