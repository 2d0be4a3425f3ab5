mod cli;
mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use koleksi_core::{
    create_collection_storage, default_entries, load_config, load_default_config,
    validate_config, CollectionStore, Config, ValidationRules,
};

use cli::Cli;
use commands::Context;

/// Config file used when neither `--config` nor `KOLEKSI_CONFIG` is given
const DEFAULT_CONFIG_PATH: &str = "koleksi.toml";

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = resolve_config(cli.config.as_deref())?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Storage path: {:?}", config.storage.path);

    let storage = create_collection_storage(&config.storage)
        .with_context(|| format!("Failed to open storage at {:?}", config.storage.path))?;
    let store = CollectionStore::new(Arc::new(storage));

    if config.storage.seed_defaults {
        store
            .seed_if_empty(default_entries())
            .context("Failed to seed collection record")?;
    }

    let ctx = Context {
        store,
        rules: ValidationRules::from(&config.validation),
        json: cli.json,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(cli.command, &ctx, &mut out)
}

/// Explicit path (flag or `KOLEKSI_CONFIG`) must exist; the default path may be absent.
fn resolve_config(flag: Option<&Path>) -> Result<Config> {
    let explicit = flag
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("KOLEKSI_CONFIG").ok().map(PathBuf::from));

    match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(path)
                    .with_context(|| format!("Failed to load config from {:?}", path))
            } else {
                info!("No config file found, using defaults");
                load_default_config().context("Failed to load default configuration")
            }
        }
    }
}
