use anyhow::Result;
use astrarag::config::Config;
use astrarag::transport;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "astrarag")]
#[command(author, version = astrarag::VERSION, about = "AstraRAG - chat frontend for an agentic RAG answer service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Chat endpoint of the answer service (overrides config and CHAT_ENDPOINT_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat web UI
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask a single question in a fresh session
    Ask {
        /// The question to send
        message: String,

        /// Print the full exchange report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive chat in the terminal
    Chat,

    /// Check whether the answer service is reachable
    Health,

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "astrarag=debug,tower_http=debug"
    } else {
        "astrarag=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    });
    if let Some(endpoint) = cli.endpoint {
        config.frontend.chat_endpoint_url = endpoint;
    }

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            tracing::info!(
                "Starting chat UI on {}:{}",
                config.server.host,
                config.server.port
            );
            transport::run_http_server(config).await?;
        }
        Commands::Ask { message, json } => {
            transport::cli::run_ask(&config, &message, json).await?;
        }
        Commands::Chat => {
            transport::cli::run_chat(&config).await?;
        }
        Commands::Health => {
            transport::cli::run_health(&config).await?;
        }
        Commands::Config => {
            transport::cli::run_config(&config)?;
        }
    }

    Ok(())
}
