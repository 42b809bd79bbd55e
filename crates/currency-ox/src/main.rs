use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use currency_ox::{Config, ConversionTool, SERVER_NAME};
use mcp_ox::{McpServer, ServerInfo, ToolSet};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::parse();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(std::io::stderr)
        .init();

    log::debug!("starting with {config:?}");

    let tools = ToolSet::new().with_toolbox(ConversionTool::new(config.client()));
    let server = McpServer::new(
        ServerInfo::new(SERVER_NAME, env!("CARGO_PKG_VERSION")),
        tools,
    );

    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}
