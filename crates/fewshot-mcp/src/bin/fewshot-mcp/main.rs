use clap::Parser;
use fewshot::PromptService;
use fewshot_mcp::FewShotServer;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fewshot MCP Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "FEWSHOT_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol; log to stderr only
    let filter = format!("fewshot_mcp={0},fewshot={0}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting fewshot MCP server on stdio");
    let server = FewShotServer::new(PromptService::in_memory());
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
