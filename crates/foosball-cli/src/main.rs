//! `foosball` — record foosball matches and show per-team statistics.
//!
//! # Usage
//!
//! ```text
//! foosball init
//! foosball add --date 2024-05-04 --team "Bob Alice" --score 10 --team "Carol Dave" --score 7
//! foosball list
//! foosball stats --sort total-score --chart
//! foosball serve --port 8080
//! ```
//!
//! Settings come from `foosball.toml` (or `--config`) and `FOOSBALL_*`
//! environment variables; see [`settings::Settings`].

mod render;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use foosball_core::{
  entry::{MatchEntry, ScoreInput},
  stats::{StatsOrder, ranked},
  store::{IngestError, MatchStore, ingest, standings},
};
use foosball_store_sqlite::SqliteStore;
use settings::Settings;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "foosball", author, version, about = "Foosball match tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "foosball.toml", global = true)]
  config: PathBuf,

  /// SQLite file to use instead of the configured `store_path`.
  #[arg(long, value_name = "FILE", global = true)]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Create the match store if it does not exist yet.
  Init,
  /// Record a match. Repeat --team/--score (and optionally --comment) once
  /// per side, in the same order.
  Add(AddArgs),
  /// Show every recorded match, newest first.
  List {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
  },
  /// Show matches played and total score per team.
  Stats {
    #[arg(long, value_enum, default_value_t = SortKey::Team)]
    sort:  SortKey,
    /// Print JSON instead of a table.
    #[arg(long)]
    json:  bool,
    /// Also draw bar charts.
    #[arg(long)]
    chart: bool,
  },
  /// Serve the JSON API under `/api`.
  Serve {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
  },
}

#[derive(Args, Debug)]
struct AddArgs {
  /// Match date (YYYY-MM-DD); defaults to today.
  #[arg(long)]
  date:     Option<NaiveDate>,
  /// Roster of one side: space-separated player names.
  #[arg(long = "team", value_name = "PLAYERS", required = true)]
  teams:    Vec<String>,
  #[arg(long = "score", allow_hyphen_values = true)]
  scores:   Vec<String>,
  /// Comment for the corresponding side.
  #[arg(long = "comment")]
  comments: Vec<String>,
}

impl AddArgs {
  /// Scores stay text here; [`MatchEntry::validate`] parses them.
  fn into_entry(self) -> MatchEntry {
    MatchEntry {
      date:     self
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive()),
      teams:    self.teams,
      scores:   self.scores.into_iter().map(ScoreInput::from).collect(),
      comments: self.comments,
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortKey {
  Team,
  Matches,
  TotalScore,
}

impl From<SortKey> for StatsOrder {
  fn from(key: SortKey) -> Self {
    match key {
      SortKey::Team => StatsOrder::Team,
      SortKey::Matches => StatsOrder::Matches,
      SortKey::TotalScore => StatsOrder::TotalScore,
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so tables and JSON on stdout stay pipeable.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config).with_context(|| {
    format!("failed to load configuration from {}", cli.config.display())
  })?;
  let store_path = cli.store.unwrap_or_else(|| settings.store_path.clone());

  // Schema setup happens here, once per process.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Init => {
      tracing::info!("match store ready at {}", store_path.display());
    }
    Command::Add(args) => add(&store, args).await?,
    Command::List { json } => list(&store, json).await?,
    Command::Stats { sort, json, chart } => {
      stats(&store, sort.into(), json, chart).await?
    }
    Command::Serve { host, port } => {
      let address = format!(
        "{}:{}",
        host.unwrap_or(settings.host),
        port.unwrap_or(settings.port)
      );
      serve(store, &address).await?
    }
  }

  Ok(())
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn add(store: &SqliteStore, args: AddArgs) -> Result<()> {
  let stored = ingest(store, args.into_entry()).await.map_err(|e| match e {
    IngestError::Validation(v) => anyhow::Error::new(v).context("match rejected"),
    IngestError::Store(s) => anyhow::Error::new(s).context("failed to store match"),
  })?;

  tracing::info!(match_id = %stored.match_id(), "recorded match");
  println!("{}", render::matches_table(std::slice::from_ref(&stored)));
  Ok(())
}

async fn list(store: &SqliteStore, json: bool) -> Result<()> {
  let matches = store.list_all().await.context("failed to read matches")?;
  if json {
    println!("{}", serde_json::to_string_pretty(&matches)?);
  } else if matches.is_empty() {
    println!("No matches recorded yet.");
  } else {
    println!("{}", render::matches_table(&matches));
  }
  Ok(())
}

async fn stats(
  store: &SqliteStore,
  order: StatsOrder,
  json: bool,
  chart: bool,
) -> Result<()> {
  let totals = standings(store).await.context("failed to read matches")?;
  let rows = ranked(&totals, order);

  if json {
    println!("{}", serde_json::to_string_pretty(&rows)?);
    return Ok(());
  }
  if rows.is_empty() {
    println!("No matches recorded yet.");
    return Ok(());
  }

  println!("{}", render::stats_table(&rows));
  if chart {
    println!();
    print!("{}", render::stats_charts(&rows));
  }
  Ok(())
}

async fn serve(store: SqliteStore, address: &str) -> Result<()> {
  let app = axum::Router::new()
    .nest("/api", foosball_api::api_router(Arc::new(store)));

  tracing::info!("Listening on http://{address}/api");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
