use lens_remote::{RemoteClient, RemoteConfig};

/// Send one query to the remote service and print its result.
pub async fn run(endpoint: &str, sql: &str) -> anyhow::Result<()> {
    let client = RemoteClient::new(RemoteConfig::new(endpoint));

    match client.invoke(sql).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(err) => {
            tracing::debug!(kind = %err.kind, "query failed");
            anyhow::bail!("{} ({})", err.message, err.kind)
        }
    }
}
