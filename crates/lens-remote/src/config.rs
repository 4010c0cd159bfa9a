/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://mcp-company-lens-v1.gepuro.net/mcp";

/// Read-only settings for the remote call adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub endpoint: String,
}

impl RemoteConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
