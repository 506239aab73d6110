//! Postboard server
//!
//! Run with: cargo run -- --admin-user admin --admin-password secret
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, else the default locations),
//! then `POSTBOARD_*` environment variables, then command-line flags.
//! `RUST_LOG` overrides the configured log level.

use anyhow::{bail, Context};
use clap::Parser;
use postboard::api::{serve, ApiConfig, AppState, BasicAuthenticator};
use postboard::config::{generate_default_config, Config, LoggingConfig};
use postboard::service::PostService;
use postboard::storage::{MemoryStore, Store};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "postboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A small message board with an admin API")]
struct Args {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address on which to start the HTTP server
    #[arg(short, long)]
    listen: Option<String>,

    /// Username for the admin API
    #[arg(long)]
    admin_user: Option<String>,

    /// Password for the admin API
    #[arg(long, default_value = "")]
    admin_password: String,

    /// CSV file to load after starting
    #[arg(long)]
    load_csv: Option<PathBuf>,

    /// The CSV file has no header record
    #[arg(long)]
    no_csv_header: bool,

    /// Print a default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = load_config(&args)?;
    init_tracing(&config.logging);

    tracing::info!("Starting Postboard v{}", env!("CARGO_PKG_VERSION"));

    if config.admin.users.is_empty() {
        bail!("no admin user configured (use --admin-user or [admin.users])");
    }

    let store = Arc::new(MemoryStore::new());

    if let Some(path) = &config.import.csv_file {
        postboard::import::load_from_path(store.as_ref(), path, config.import.has_header)
            .with_context(|| format!("failed to import posts from {}", path.display()))?;
        tracing::info!("Store holds {} posts after import", store.stats().posts);
    }

    let service = PostService::with_limits(store, config.pagination.limits());
    let authenticator = BasicAuthenticator::new(config.admin.users.clone());
    let api_config = ApiConfig::from(&config.server);

    tracing::info!(
        "{} admin user(s), page size {} (max {})",
        authenticator.user_count(),
        config.pagination.default_page_size,
        config.pagination.max_page_size
    );

    let state = AppState::new(service, authenticator);
    serve(state, &api_config).await.context("server failed")?;

    tracing::info!("Postboard stopped");
    Ok(())
}

/// Build the effective configuration: file, then environment, then flags
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };

    if let Some(listen) = &args.listen {
        config.server.listen = listen.clone();
    }

    if let Some(user) = &args.admin_user {
        config
            .admin
            .users
            .insert(user.clone(), args.admin_password.clone());
    }

    if let Some(path) = &args.load_csv {
        config.import.csv_file = Some(path.clone());
    }

    if args.no_csv_header {
        config.import.has_header = false;
    }

    // Overrides bypass the checks done when parsing the file
    config.validate().context("invalid configuration")?;

    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
