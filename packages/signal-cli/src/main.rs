//! CLI for generating social signal reports
//!
//! Searches Reddit through Apify (or reads an exported batch of posts) and
//! prints the aggregate report as JSON on stdout. Logs go to stderr.

mod config;

use anyhow::{Context, Result};
use apify_client::ApifyClient;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use signal_engine::{
    ApifyRedditSource, DefaultLexicon, EngineConfig, FileLexicon, LexiconProvider, PostSource,
    SignalEngine, SourceQuery, StaticPostSource,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Parser)]
#[command(name = "signal-report")]
#[command(about = "Aggregate community sentiment for a topic")]
struct Cli {
    /// Lexicon JSON file (overrides SIGNAL_LEXICON_PATH)
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Upstream fetch deadline in seconds (overrides SIGNAL_FETCH_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Reddit for a topic and report on the results
    Search {
        topic: String,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        geography: Option<String>,
        /// week, month, quarter or year
        #[arg(long)]
        window: Option<String>,
        /// Maximum posts to fetch (overrides SIGNAL_POST_LIMIT)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Report on posts exported to a JSON file
    Analyze {
        posts: PathBuf,
        /// Label echoed in the report
        #[arg(long, default_value = "offline batch")]
        topic: String,
        #[arg(long)]
        window: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,signal_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let lexicon: Box<dyn LexiconProvider> = match cli.lexicon.or(config.lexicon_path.clone()) {
        Some(path) => Box::new(
            FileLexicon::load(&path)
                .with_context(|| format!("Failed to load lexicon from {}", path.display()))?,
        ),
        None => Box::new(DefaultLexicon),
    };
    let fetch_timeout = cli
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(config.fetch_timeout);

    let json = match cli.command {
        Commands::Search {
            topic,
            industry,
            geography,
            window,
            limit,
        } => {
            let token = config
                .apify_api_token
                .as_ref()
                .context("APIFY_API_TOKEN must be set for live searches")?;
            let source = ApifyRedditSource::new(ApifyClient::new(
                token.expose_secret().to_string(),
            ))
            .with_max_items(limit.unwrap_or(config.post_limit));

            let mut query = SourceQuery::new(topic);
            query.industry = industry;
            query.geography = geography;
            query.time_window = window;

            run(source, query, lexicon.as_ref(), fetch_timeout).await?
        }
        Commands::Analyze {
            posts,
            topic,
            window,
        } => {
            let raw = std::fs::read_to_string(&posts)
                .with_context(|| format!("Failed to read {}", posts.display()))?;
            let source = StaticPostSource::from_json(&raw)
                .with_context(|| format!("Failed to parse posts in {}", posts.display()))?;
            tracing::info!(posts = source.len(), "Loaded posts from file");

            let mut query = SourceQuery::new(topic);
            query.time_window = window;

            run(source, query, lexicon.as_ref(), fetch_timeout).await?
        }
    };

    println!("{}", json);
    Ok(())
}

async fn run<S: PostSource>(
    source: S,
    query: SourceQuery,
    lexicon: &dyn LexiconProvider,
    fetch_timeout: Duration,
) -> Result<String> {
    let engine = SignalEngine::with_config(source, lexicon, EngineConfig::default())
        .with_fetch_timeout(fetch_timeout);

    // Ctrl-C abandons the fetch; the degraded report is still printed
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling fetch");
            on_signal.cancel();
        }
    });

    let report = engine.report_with_cancel(&query, cancel).await;
    if report.is_degraded() {
        tracing::warn!(warnings = ?report.warnings(), "Report is degraded");
    }

    report.to_json().context("Failed to serialize report")
}
