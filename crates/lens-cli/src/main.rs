use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lens_mcp::ToolCatalog;
use lens_remote::{RemoteClient, RemoteConfig, DEFAULT_ENDPOINT};

mod query_cmd;

#[derive(Parser)]
#[command(name = "company-lens-cli", about = "Company Lens CLI - query the remote database directly")]
struct Cli {
    /// Remote JSON-RPC endpoint that executes the queries
    #[arg(long, env = "COMPANY_LENS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a SELECT query through the remote service and print the result
    Query {
        /// SQL to execute (SELECT only)
        sql: String,
    },

    /// Print the tools the stdio proxy advertises
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query { sql } => {
            query_cmd::run(&cli.endpoint, &sql).await?;
        }
        Commands::Tools => {
            let client = RemoteClient::new(RemoteConfig::new(&cli.endpoint));
            let catalog = ToolCatalog::with_execute_query(Arc::new(client));
            println!("{}", serde_json::to_string_pretty(&catalog.descriptors())?);
        }
    }

    Ok(())
}
