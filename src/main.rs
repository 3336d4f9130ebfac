#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use patterncraft::config::{self, load_configuration};
use patterncraft::datamodel::pattern_record::base_name;
use patterncraft::http::server::run_http_server;
use patterncraft::http::state::HttpServerState;
use patterncraft::importers::csv::classify_csv_bytes;
use patterncraft::patterns::PatternClassifier;
use patterncraft::storage::storage_factory::create_storage_from_connection_string;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing::event;

#[derive(Debug, Parser)]
#[command(name = "patterncraft", version, about = "Detects patterns in CSV datasets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Classify a local CSV file and print the result as JSON
    Classify {
        /// Path to a CSV file with a header row
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Logs go to stderr so the classify output stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Classify { path } => classify_file(path).await,
    }
}

async fn classify_file(path: PathBuf) -> Result<()> {
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let source_name = base_name(&path.to_string_lossy()).to_string();

    let classifier = PatternClassifier::default();
    let result = classify_csv_bytes(&classifier, &source_name, &data).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn serve() -> Result<()> {
    // Load configuration
    load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    // Initialize Sentry if DSN is provided
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    event!(
        Level::INFO,
        "Connecting to storage: {}",
        config.storage_connection_string
    );
    let storage = create_storage_from_connection_string(&config.storage_connection_string)
        .await
        .context("Failed to create storage backend")?;

    storage
        .create_or_migrate()
        .await
        .context("Failed to create or migrate database schema")?;
    event!(Level::INFO, "Storage backend initialized");

    // Exit the program if a panic occurs
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        default_panic(info);
        std::process::exit(1);
    }));

    let address = SocketAddr::from((config.endpoint, config.port));

    let state = HttpServerState {
        name: Arc::new("PatternCraft".to_string()),
        storage,
        classifier: Arc::new(PatternClassifier::default()),
        upload_directory: config.upload_directory.as_ref().map(PathBuf::from),
        max_listed_patterns: config.max_listed_patterns,
    };

    event!(Level::INFO, "Starting HTTP server on {}", address);
    match run_http_server(state, address).await {
        Ok(_) => {
            event!(Level::INFO, "HTTP server stopped gracefully");
            Ok(())
        }
        Err(err) => {
            event!(Level::ERROR, "HTTP server failed to start: {}", err);
            Err(err)
        }
    }
}
