use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;

use pet_registry::{AnimalRegistry, JsonStore, Menu, RegistryConfig, SpeciesCatalog};

/// Pet registry - track pets and the commands they know
#[derive(Parser)]
#[command(name = "pet-registry")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, env = "PET_REGISTRY_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the JSON store (overrides the config file)
    #[arg(short, long, env = "PET_REGISTRY_STORE", value_name = "FILE")]
    store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PET_REGISTRY_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut config =
        RegistryConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(store) = cli.store {
        config = config
            .with_store_path(store)
            .context("Invalid --store path")?;
    }

    let catalog = SpeciesCatalog::from_config(&config.species);
    let mut registry = AnimalRegistry::open(JsonStore::new(config.store_path));

    let stdin = io::stdin();
    Menu::new(&mut registry, &catalog, stdin.lock(), io::stdout())
        .run()
        .context("Console I/O failed")?;

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    // stderr keeps the menu on stdout readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
