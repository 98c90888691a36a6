use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use newsreel::article::Article;
use newsreel::audit;
use newsreel::banner::{BannerInfo, print_banner};
use newsreel::config::Config;
use newsreel::consts::{
    DEFAULT_CONCURRENCY, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_PORT, default_db_path,
};
use newsreel::engine::{Engine, ScrapeConfig, ScrapeEngine};
use newsreel::events::{Event, EventBus};
use newsreel::export;
use newsreel::fetch::{Fetcher, HttpFetcher};
use newsreel::server::{self, AppState};
use newsreel::sources::{SourceEntry, SourceRegistry, default_entries};
use newsreel::store::{ArticleStore, SqliteStore};

#[derive(Parser)]
#[command(name = "newsreel", version, about = "Film news, pulled off the wire.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database path (use :memory: for ephemeral)
    #[arg(short, long, global = true, env = "NEWSREEL_DB")]
    db: Option<String>,

    /// Article pages fetched in parallel per source
    #[arg(short, long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Page fetch timeout in seconds
    #[arg(short, long, global = true, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Scrape every enabled source once
    Run,
    /// Scrape one section front
    Process { url: String },
    /// Show or change the source list
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },
    /// Write stored articles as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List suspicious headlines on a page
    Audit {
        url: String,
        #[arg(short, long, default_value = audit::DEFAULT_OUT)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum SourcesAction {
    List,
    Enable { name: String },
    Disable { name: String },
    SetUrl { name: String, url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsreel=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let db = db_path(cli.db.clone())?;
    let config = Config::open(&db)?;
    let entries = config.entries(default_entries())?;

    match &cli.command {
        Command::Serve { host, port } => {
            let store = Arc::new(SqliteStore::new(&db)?);
            let engine = build_engine(&cli, entries.clone(), Arc::new(EventBus::default())).await?;
            print_banner(&BannerInfo {
                listen: &format!("{host}:{port}"),
                db: &db,
                entries: &entries,
            });
            let state = AppState {
                engine: Arc::new(engine),
                store,
                entries: Arc::new(entries),
            };
            server::serve(state, host, *port).await
        }
        Command::Run => {
            let store = SqliteStore::new(&db)?;
            let events = Arc::new(EventBus::default());
            let printer = tokio::spawn(print_progress(events.subscribe()));
            let engine = build_engine(&cli, entries, Arc::clone(&events)).await?;
            let result = engine.run().await;
            // Closing the bus ends the printer.
            drop(engine);
            drop(events);
            printer.await?;
            finish(&store, result?).await
        }
        Command::Process { url } => {
            let store = SqliteStore::new(&db)?;
            let engine = build_engine(&cli, entries, Arc::new(EventBus::default())).await?;
            let articles = engine.process(url).await?;
            finish(&store, articles).await
        }
        Command::Sources { action } => handle_sources(&config, entries, action),
        Command::Export { out } => {
            let store = SqliteStore::new(&db)?;
            let csv = export::to_csv(&store.history(usize::MAX).await?)?;
            match out {
                Some(path) => {
                    std::fs::write(path, csv)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("✓ Wrote {}", path.display());
                }
                None => print!("{csv}"),
            }
            Ok(())
        }
        Command::Audit { url, out } => {
            let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout))?;
            let Some(html) = fetcher.fetch(url).await? else {
                bail!("failed to retrieve {url}");
            };
            let flagged = audit::suspicious(&audit::headlines(&html)?);
            for entry in &flagged {
                println!("  ✗ {entry}");
            }
            std::fs::write(out, audit::to_csv(&flagged)?)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{} suspicious entries saved to {}", flagged.len(), out.display());
            Ok(())
        }
    }
}

/// Resolve the database path, creating the parent directory of the default.
fn db_path(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(path) = flag {
        return Ok(path);
    }
    let path = default_db_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    path.to_str()
        .map(str::to_string)
        .context("database path is not valid UTF-8")
}

async fn build_engine(
    cli: &Cli,
    entries: Vec<SourceEntry>,
    events: Arc<EventBus>,
) -> anyhow::Result<ScrapeEngine> {
    let fetch_timeout = Duration::from_secs(cli.timeout);
    let fetcher = Arc::new(HttpFetcher::new(fetch_timeout)?);
    let sources = Arc::new(SourceRegistry::with_defaults().await);
    let config = ScrapeConfig {
        concurrency: cli.concurrency,
        fetch_timeout,
        entries,
    };
    Ok(ScrapeEngine::new(fetcher, sources, events, config))
}

async fn print_progress(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => eprintln!("{event}"),
            Err(RecvError::Lagged(n)) => eprintln!("  ({n} progress events skipped)"),
            Err(RecvError::Closed) => break,
        }
    }
}

/// Store the articles and print them as JSON.
async fn finish(store: &SqliteStore, articles: Vec<Article>) -> anyhow::Result<()> {
    let stored = store.store(&articles).await?;
    println!("{}", serde_json::to_string_pretty(&articles)?);
    eprintln!("stored {stored} article(s)");
    Ok(())
}

fn handle_sources(
    config: &Config,
    entries: Vec<SourceEntry>,
    action: &SourcesAction,
) -> anyhow::Result<()> {
    let known = |name: &str| -> anyhow::Result<()> {
        if entries.iter().any(|e| e.name == name) {
            Ok(())
        } else {
            bail!("unknown source {name:?}")
        }
    };
    match action {
        SourcesAction::List => {
            for entry in &entries {
                let mark = if entry.enabled { "✓" } else { " " };
                println!("  {mark} {:<18} {}", entry.name, entry.url);
            }
        }
        SourcesAction::Enable { name } => {
            known(name)?;
            config.set_source_enabled(name, true)?;
            println!("✓ Enabled {name}");
        }
        SourcesAction::Disable { name } => {
            known(name)?;
            config.set_source_enabled(name, false)?;
            println!("✓ Disabled {name}");
        }
        SourcesAction::SetUrl { name, url } => {
            known(name)?;
            config.set_source_url(name, url)?;
            println!("✓ {name} now scrapes {url}");
        }
    }
    Ok(())
}
