/// Jotter - terminal client for the notes service
use clap::Parser;
use jotter_cli::{CliConfig, LineEditor, Shell};
use jotter_client::JotterClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Personal notes with email one-time-code sign-in", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to ./jotter.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the notes API
    #[arg(long, env = "JOTTER_BACKEND_URL")]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = CliConfig::load(cli.config.as_deref())?.with_backend_url(cli.backend_url);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    config.validate()?;
    tracing::info!(backend = %config.backend.url, "Starting Jotter");

    let client = JotterClient::new(config.client_config())?;
    let editor = LineEditor::new()?;

    let mut shell = Shell::new(client, editor, std::io::stdout());
    shell.run().await?;

    tracing::info!("Bye");
    Ok(())
}
