//! Worksable console entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use worksable::adapters::{
    ConsoleApp, FileKeyValueStore, InMemoryKeyValueStore, KeyValueProfileStore, LocalAccountStore,
};
use worksable::config::{AppConfig, LogFormat, StorageBackend};
use worksable::ports::KeyValueStore;

#[derive(Debug, Parser)]
#[command(name = "worksable", about = "Candidate onboarding console")]
struct Args {
    /// Overrides the configured data directory (implies the file backend)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, conflicts_with = "data_dir")]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = args.data_dir {
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = dir;
    }
    if args.memory {
        config.storage.backend = StorageBackend::Memory;
    }
    config.validate()?;

    init_tracing(&config)?;
    tracing::info!(
        environment = ?config.environment,
        backend = ?config.storage.backend,
        "starting worksable"
    );

    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        StorageBackend::File => {
            tracing::info!(data_dir = %config.storage.data_dir.display(), "using file storage");
            Arc::new(FileKeyValueStore::new(&config.storage.data_dir))
        }
    };

    let accounts = Arc::new(LocalAccountStore::new(store.clone()));
    let profiles = Arc::new(KeyValueProfileStore::new(store));

    let mut app = ConsoleApp::new(accounts, profiles);
    app.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    tracing::info!("console closed");
    Ok(())
}

/// Logs go to stderr so they never interleave with console replies.
fn init_tracing(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = config.logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
    Ok(())
}
