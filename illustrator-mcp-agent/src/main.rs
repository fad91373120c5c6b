use anyhow::Result;
use clap::{Parser, ValueEnum};
use illustrator_mcp_agent::server::IllustratorWrapper;
use illustrator_mcp_agent::utils::init_logging;
use rmcp::{transport::sse_server::SseServer, transport::stdio, ServiceExt};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Illustrator MCP Server - drive Adobe Illustrator via Model Context Protocol"
)]
struct Args {
    /// Transport mode to use
    #[arg(short, long, value_enum, default_value = "stdio")]
    transport: TransportMode,

    /// Port to listen on (only used for the SSE transport)
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to (only used for the SSE transport)
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Window title of the application to automate
    #[arg(long, env = "ILLUSTRATOR_APP_NAME", default_value = "Adobe Illustrator")]
    app_name: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum TransportMode {
    /// Standard I/O transport (default)
    Stdio,
    /// Server-Sent Events transport for web integrations
    Sse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging()?;

    tracing::info!("Initializing Illustrator MCP server...");
    tracing::info!("Transport mode: {:?}", args.transport);

    // Probed once; hosts without COM get a uniformly-unavailable bridge.
    let bridge = illustrator::detect_bridge(&args.app_name);

    match args.transport {
        TransportMode::Stdio => {
            tracing::info!("Starting stdio transport...");
            let wrapper = IllustratorWrapper::new(bridge);
            let service = wrapper.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Serving error: {:?}", e);
            })?;

            service.waiting().await?;
        }
        TransportMode::Sse => {
            let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
            tracing::info!("Starting SSE server on http://{}", addr);

            let wrapper = IllustratorWrapper::new(bridge);
            let ct = SseServer::serve(addr)
                .await?
                .with_service(move || wrapper.clone());

            println!("SSE server running on http://{addr}");
            println!("Connect your MCP client to:");
            println!("  SSE endpoint: http://{addr}/sse");
            println!("  Message endpoint: http://{addr}/message");
            println!("Press Ctrl+C to stop");

            tokio::signal::ctrl_c().await?;
            ct.cancel();
            tracing::info!("Shutting down SSE server");
        }
    }

    Ok(())
}
