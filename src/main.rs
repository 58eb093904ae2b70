use anyhow::Result;
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sf_api::{AppState, ServerConfig, serve};
use sf_core::VisionModel;
use sf_vision::{AzureOpenAiClient, redact};

#[derive(Parser)]
#[command(name = "style-finder")]
#[command(about = "Outfit analysis API backed by a hosted vision model", long_about = None)]
struct Cli {
    /// Address to bind (overrides STYLE_FINDER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides STYLE_FINDER_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Refuse to start without model credentials
    let client = match AzureOpenAiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "❌".red(), e);
            eprintln!("Set these in the environment or a .env file:");
            eprintln!("  AZURE_OPENAI_API_KEY=your_api_key_here");
            eprintln!("  AZURE_OPENAI_ENDPOINT=your_endpoint_here");
            eprintln!("  AZURE_OPENAI_DEPLOYMENT=your_deployment_here (optional)");
            eprintln!("  AZURE_OPENAI_API_VERSION=2024-12-01-preview (optional)");
            std::process::exit(1);
        }
    };

    let config = client.config();
    info!(
        endpoint = %config.endpoint,
        deployment = %config.deployment,
        api_version = %config.api_version,
        api_key = %redact(&config.api_key),
        "Vision model configured"
    );

    let mut server = ServerConfig::from_env()?;
    if let Some(host) = cli.host {
        server.host = host;
    }
    if let Some(port) = cli.port {
        server.port = port;
    }

    let model: Arc<dyn VisionModel> = Arc::new(client);
    println!(
        "{} Style-Finder API on http://{}",
        "👗".cyan(),
        server.address().bold()
    );

    serve(&server, AppState::new(model)).await?;

    Ok(())
}
