//! `fotohub` — load and serve the club graph.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite store, and either runs the loaders (`sync`), serves the JSON
//! API (`serve`), or talks to the roadmap vote boundary (`roadmap`).
//!
//! # Usage
//!
//! ```
//! fotohub sync
//! fotohub serve
//! fotohub roadmap
//! fotohub roadmap --vote 12
//! ```

mod roadmap;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use fotohub_core::entity::OrganizationIdPlus;
use fotohub_store_sqlite::SqliteStore;
use fotohub_sync::{
  FailurePolicy, LoadQueue, SyncEngine, TypeRegistry, feed,
  roster::{MemberNameLists, RosterSource, load_roster},
  seed,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::roadmap::{RoadmapClient, RoadmapSettings};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "fotohub club graph loader and server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run every loader: seed rosters, the organization feed, and the
  /// configured roster scrape.
  Sync,
  /// Serve the read-only JSON API.
  Serve,
  /// List roadmap feature items and their vote counts.
  Roadmap {
    /// Cast a vote for the item with this id instead of listing.
    #[arg(long)]
    vote: Option<String>,
  },
}

// ─── Settings ────────────────────────────────────────────────────────────────

fn default_store_path() -> PathBuf { PathBuf::from("fotohub.db") }

fn default_feed_url() -> String {
  "https://raw.githubusercontent.com/vdhamer/Photo-Club-Hub/main/\
   Photo%20Club%20Hub/ViewModel/Lists/OrganizationList.json"
    .to_string()
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 5238 }

/// Shape of `config.toml`, overridable per key via `FOTOHUB_*` env vars.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  #[serde(default = "default_store_path")]
  store_path:            PathBuf,
  #[serde(default = "default_feed_url")]
  organization_list_url: String,
  /// Commit after every changed write instead of per batch.
  #[serde(default)]
  eager_commits:         bool,
  #[serde(default = "default_host")]
  host:                  String,
  #[serde(default = "default_port")]
  port:                  u16,
  #[serde(default)]
  roster:                Option<RosterSettings>,
  #[serde(default)]
  roadmap:               RoadmapSettings,
}

/// One scraped roster, tied to the club it belongs to.
#[derive(Debug, Clone, Deserialize)]
struct RosterSettings {
  full_name:           String,
  town:                String,
  #[serde(default)]
  nickname:            String,
  page_url:            String,
  profile_base_url:    String,
  #[serde(default)]
  current_members:     Vec<String>,
  #[serde(default)]
  prospective_members: Vec<String>,
  #[serde(default)]
  coaches:             Vec<String>,
}

fn load_settings(path: &PathBuf) -> Result<Settings> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.clone()).required(false))
    .add_source(config::Environment::with_prefix("FOTOHUB"))
    .build()
    .context("failed to read config file")?;

  settings.try_deserialize().context("failed to deserialise Settings")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = load_settings(&cli.config)?;

  match cli.command {
    Command::Sync => run_sync(settings).await,
    Command::Serve => run_serve(settings).await,
    Command::Roadmap { vote } => run_roadmap(settings, vote).await,
  }
}

// ─── sync ─────────────────────────────────────────────────────────────────────

async fn run_sync(settings: Settings) -> Result<()> {
  let store = Arc::new(
    SqliteStore::open(&settings.store_path)
      .await
      .with_context(|| {
        format!("failed to open store at {:?}", settings.store_path)
      })?,
  );

  // The type registry is built here, before the queue exists, and handed
  // to the engine by value — loaders can never observe a partial one.
  let registry =
    TypeRegistry::initialize(store.as_ref(), FailurePolicy::default_for_build())
      .await
      .context("failed to initialise organization types")?;

  let engine = Arc::new(
    SyncEngine::new(store, registry)
      .with_eager_commits(settings.eager_commits),
  );
  let queue = LoadQueue::new();

  // One queued unit of work per organization load; units run one at a
  // time, in order.
  for (name, loader) in seed_loaders() {
    let engine = engine.clone();
    queue
      .run(async move { loader(engine).await })
      .await
      .context("load queue closed")?
      .with_context(|| format!("seed loader {name} failed"))?;
  }

  // The organization feed is seed configuration: failure here is fatal.
  let summary = {
    let engine = engine.clone();
    let url = settings.organization_list_url.clone();
    queue
      .run(async move { feed::ingest_organization_list(&engine, &url).await })
      .await
      .context("load queue closed")?
      .context("organization feed ingestion failed")?
  };
  tracing::info!(
    created = summary.created,
    updated = summary.updated,
    unchanged = summary.unchanged,
    "organization feed ingested"
  );

  // A failed roster scrape aborts only that organization's load.
  if let Some(roster_cfg) = settings.roster {
    let engine = engine.clone();
    let id_plus = OrganizationIdPlus::new(
      &roster_cfg.full_name,
      &roster_cfg.town,
      &roster_cfg.nickname,
    );
    let source = RosterSource {
      page_url:         roster_cfg.page_url.clone(),
      profile_base_url: roster_cfg.profile_base_url.clone(),
    };
    let lists = MemberNameLists {
      current:     roster_cfg.current_members,
      prospective: roster_cfg.prospective_members,
      coaches:     roster_cfg.coaches,
    };

    let result = queue
      .run(async move { load_roster(&engine, &id_plus, &source, &lists).await })
      .await
      .context("load queue closed")?;

    match result {
      Ok(summary) => tracing::info!(
        records = summary.records,
        images_refreshed = summary.images_refreshed,
        "roster loaded"
      ),
      Err(e) => tracing::error!("roster load failed: {e}"),
    }
  }

  Ok(())
}

type SeedLoader = fn(
  Arc<SyncEngine<SqliteStore>>,
) -> std::pin::Pin<
  Box<
    dyn Future<Output = fotohub_sync::Result<()>> + Send,
  >,
>;

fn seed_loaders() -> Vec<(&'static str, SeedLoader)> {
  vec![
    ("waalre", |e| {
      Box::pin(async move { seed::waalre::insert_hardcoded_members(&e).await })
    }),
    ("bellus_imago", |e| {
      Box::pin(
        async move { seed::bellus_imago::insert_hardcoded_members(&e).await },
      )
    }),
    ("de_gender", |e| {
      Box::pin(
        async move { seed::de_gender::insert_hardcoded_members(&e).await },
      )
    }),
    ("anders", |e| {
      Box::pin(async move { seed::anders::insert_hardcoded_members(&e).await })
    }),
  ]
}

// ─── serve ────────────────────────────────────────────────────────────────────

async fn run_serve(settings: Settings) -> Result<()> {
  let store = Arc::new(
    SqliteStore::open(&settings.store_path)
      .await
      .with_context(|| {
        format!("failed to open store at {:?}", settings.store_path)
      })?,
  );

  let app = axum::Router::new()
    .nest("/api", fotohub_api::api_router(store))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", settings.host, settings.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}

// ─── roadmap ──────────────────────────────────────────────────────────────────

async fn run_roadmap(settings: Settings, vote: Option<String>) -> Result<()> {
  let client = RoadmapClient::new(settings.roadmap)?;
  let items = client.feature_items().await?;

  if let Some(vote_id) = vote {
    let Some(item) = items.iter().find(|i| i.id == vote_id) else {
      bail!("no roadmap item with id {vote_id:?}");
    };
    let count = client.cast_vote(item).await?;
    println!("voted for {:?}, now at {count} votes", item.title);
    return Ok(());
  }

  for item in &items {
    let count = client.vote_count(item).await.unwrap_or(0);
    let status = item.status.as_deref().unwrap_or("unplanned");
    println!("{count:>5}  [{status}] {}: {}", item.id, item.title);
  }
  Ok(())
}
