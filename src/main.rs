use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{Config, load_config, validate};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Cambio quotation service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Serve(args) => handle_serve(args, &mut config).await,
        Commands::Fetch(args) => handle_fetch(args, &mut config).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = ?e, "Fatal error.");
    }
    result
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Fetches USD/BRL quotations, records them, and serves them over HTTP.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the quotation server.
    Serve(ServeArgs),
    /// Ask a running server for a quotation and write the bid to a file.
    Fetch(FetchArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (e.g., "0.0.0.0:8080").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct FetchArgs {
    /// Full URL of the server's quotation endpoint.
    #[arg(long)]
    url: Option<String>,

    /// Outer deadline for the whole request, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// File to write the bid to.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, config: &mut Config) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    tracing::info!("Starting quotation server.");
    web_server::run_server(config).await
}

async fn handle_fetch(args: FetchArgs, config: &mut Config) -> anyhow::Result<()> {
    if let Some(url) = args.url {
        config.client.server_url = url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.client.timeout_ms = timeout_ms;
    }
    if let Some(output) = args.output {
        config.client.output = output;
    }
    // Overrides may have broken the deadline chain.
    validate(config)?;

    quote_client::run(&config.client)
        .await
        .context("failed to fetch the quotation")?;
    Ok(())
}
