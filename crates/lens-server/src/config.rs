use clap::Parser;

use lens_remote::{RemoteConfig, DEFAULT_ENDPOINT};

#[derive(Debug, Parser)]
#[command(
    name = "company-lens",
    version,
    about = "MCP stdio proxy for read-only queries against the Company Lens database"
)]
pub struct Args {
    /// Remote JSON-RPC endpoint that executes the queries
    #[arg(long, env = "COMPANY_LENS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl Args {
    pub fn remote_config(&self) -> RemoteConfig {
        RemoteConfig::new(&self.endpoint)
    }
}
