//! ConfoUP server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store (or an in-memory one with `--in-memory`), and serves the compliance
//! API over HTTP under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use confo_core::store::ComplianceStore;
use confo_store_memory::MemoryStore;
use confo_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "ConfoUP compliance API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Serve from a volatile in-memory store instead of SQLite.
  #[arg(long)]
  in_memory: bool,

  /// Load the bundled sample bulletins on startup. Safe to repeat:
  /// bulletins whose reference already exists are skipped.
  #[arg(long)]
  seed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ServerConfig {
  host:    String,
  port:    u16,
  db_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    "127.0.0.1".to_string(),
      port:    8080,
      db_path: PathBuf::from("confo.db"),
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("CONFO"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let api = if cli.in_memory {
    let store = Arc::new(MemoryStore::new());
    if cli.seed {
      seed_documents(store.as_ref()).await?;
    }
    confo_api::api_router(store)
  } else {
    let db_path = expand_tilde(&server_cfg.db_path);
    let store = SqliteStore::open(&db_path)
      .await
      .with_context(|| format!("failed to open store at {db_path:?}"))?;
    let store = Arc::new(store);
    if cli.seed {
      seed_documents(store.as_ref()).await?;
    }
    confo_api::api_router(store)
  };

  let app = axum::Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Insert the bundled sample bulletins, skipping references that already
/// exist so re-seeding a persistent store stays idempotent.
async fn seed_documents<S: ComplianceStore>(store: &S) -> anyhow::Result<()> {
  let mut inserted = 0usize;
  for doc in confo_store_memory::seed::sample_documents() {
    match store.create_bo_document(doc).await {
      Ok(_) => inserted += 1,
      Err(e) if e.is_conflict() => {}
      Err(e) => return Err(e.into()),
    }
  }
  tracing::info!("seeded {inserted} sample bulletins");
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
