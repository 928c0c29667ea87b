use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use swatch_artifact::S3ObjectClient;
use swatch_config::ProxyConfig;
use swatch_fetch::{Fetcher, Resolver};
use swatch_host_http::RemoteClient;
use swatch_locator::Locator;
use swatch_record::{Collection, FsRecordStore};

/// Swatch - asset resolution and streaming proxy for the apparel catalog
#[derive(Parser)]
#[command(name = "swatch")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON config file
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Directory holding record documents (overrides config and env)
  #[arg(long, global = true)]
  records_dir: Option<PathBuf>,

  /// Root for legacy local asset paths (overrides config and env)
  #[arg(long, global = true)]
  uploads_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the HTTP proxy
  Serve {
    /// Address to listen on
    #[arg(long)]
    listen: Option<SocketAddr>,
  },

  /// Print the candidate locations for a record as JSON
  Locate {
    #[arg(value_parser = parse_collection)]
    collection: Collection,
    id: String,
  },

  /// Check whether a record's asset is available
  Probe {
    #[arg(value_parser = parse_collection)]
    collection: Collection,
    id: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging();

  let mut config = ProxyConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
  if let Some(dir) = cli.records_dir {
    config.records_root = dir;
  }
  if let Some(dir) = cli.uploads_dir {
    config.uploads_root = dir;
  }

  let rt = tokio::runtime::Runtime::new()?;
  match cli.command {
    Some(Commands::Serve { listen }) => {
      if let Some(listen) = listen {
        config.listen = listen;
      }
      rt.block_on(serve(config))
    }
    Some(Commands::Locate { collection, id }) => rt.block_on(locate(config, collection, id)),
    Some(Commands::Probe { collection, id }) => rt.block_on(probe(config, collection, id)),
    None => {
      println!("swatch - use --help to see available commands");
      Ok(())
    }
  }
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .init();
}

fn parse_collection(s: &str) -> Result<Collection, String> {
  Collection::parse(s).ok_or_else(|| {
    let known: Vec<_> = Collection::ALL.iter().map(Collection::as_str).collect();
    format!("unknown collection '{}' (expected one of: {})", s, known.join(", "))
  })
}

fn build_resolver(config: &ProxyConfig) -> Result<Resolver> {
  if !config.object_store.is_configured() {
    warn!("object store credentials not set; object-store assets will be refused");
  }

  let records = Arc::new(FsRecordStore::new(&config.records_root));
  let objects = Arc::new(S3ObjectClient::new(config.object_store.clone()));
  let remote = RemoteClient::new(&config.remote).context("failed to build http client")?;
  let locator = Locator::new(&config.uploads_root, config.default_bucket.clone());

  Ok(Resolver::new(records, locator, Fetcher::new(objects, remote)))
}

async fn serve(config: ProxyConfig) -> Result<()> {
  let resolver = Arc::new(build_resolver(&config)?);

  info!(
    records = %config.records_root.display(),
    uploads = %config.uploads_root.display(),
    default_bucket = config.default_bucket.as_deref().unwrap_or("<none>"),
    region = %config.object_store.region,
    "starting asset proxy"
  );

  let listener = tokio::net::TcpListener::bind(config.listen)
    .await
    .with_context(|| format!("failed to bind {}", config.listen))?;

  let cancel = CancellationToken::new();
  let shutdown = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      info!("shutdown requested");
      shutdown.cancel();
    }
  });

  swatch_server::serve(listener, swatch_server::router(resolver), cancel)
    .await
    .context("server error")?;

  info!("asset proxy stopped");
  Ok(())
}

async fn locate(config: ProxyConfig, collection: Collection, id: String) -> Result<()> {
  let resolver = build_resolver(&config)?;
  let Some(candidates) = resolver
    .locate(collection, &id)
    .await
    .with_context(|| format!("failed to read record {}/{}", collection, id))?
  else {
    bail!("record {}/{} not found", collection, id);
  };

  println!("{}", serde_json::to_string_pretty(&candidates)?);
  Ok(())
}

async fn probe(config: ProxyConfig, collection: Collection, id: String) -> Result<()> {
  let resolver = build_resolver(&config)?;
  let exists = resolver
    .probe(collection, &id)
    .await
    .with_context(|| format!("failed to read record {}/{}", collection, id))?;

  println!("{}", if exists { "exists" } else { "not found" });
  Ok(())
}
