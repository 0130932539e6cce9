mod cache;
mod embed;
mod relevance;
mod search;
mod server;
mod summary;
mod wiki;

/// Wikipedia's API etiquette asks for an identifying User-Agent with contact info.
pub const USER_AGENT: &str = concat!(
    "wikisift/",
    env!("CARGO_PKG_VERSION"),
    " (semantic article search; +https://github.com/thkt/wikisift)"
);

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use embed::{Embedder, HashedTrigramEmbedder};
use relevance::RelevanceThresholds;
use search::{PipelineConfig, SearchPipeline};
use summary::{Summarizer, SummaryMode};
use wiki::WikiClient;

#[derive(Parser, Debug)]
#[command(name = "wikisift", version, about = "Semantic article search over Wikipedia")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "WIKISIFT_PORT", default_value_t = 8000)]
    port: u16,

    /// Edition searched first and preferred when a title appears in both.
    #[arg(long, env = "WIKISIFT_LOCAL_LANG", default_value = "fa")]
    local_lang: String,

    /// Second edition included in every search.
    #[arg(long, env = "WIKISIFT_CROSS_LANG", default_value = "en")]
    cross_lang: String,

    /// Titles collected per edition before merging.
    #[arg(long, default_value_t = 800)]
    search_cap: usize,

    /// Titles taken from each edition into the scored candidate set.
    #[arg(long, default_value_t = 15)]
    merge_limit: usize,

    /// Results returned per query.
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Percent above which a result is labeled a likely complete answer.
    #[arg(long, default_value_t = 82.0)]
    high_threshold: f64,

    /// Percent above which a result is labeled partially relevant.
    #[arg(long, default_value_t = 58.0)]
    medium_threshold: f64,

    /// Queries kept in the result cache before the oldest is evicted.
    #[arg(long, default_value_t = 100)]
    cache_capacity: usize,

    /// Summary strategy.
    #[arg(long, value_enum, default_value = "extractive")]
    summary_mode: SummaryMode,

    /// Milliseconds to wait between search result pages.
    #[arg(long, default_value_t = 600)]
    page_delay_ms: u64,

    /// Alternate MediaWiki API base URL (proxy and test setups).
    #[arg(long, env = "WIKISIFT_API_BASE")]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wikisift=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let http = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let wiki = match &args.api_base {
        Some(base) => {
            url::Url::parse(base)?;
            WikiClient::with_api_base(http, base)
        }
        None => WikiClient::new(http),
    }
    .page_delay(Duration::from_millis(args.page_delay_ms));

    // The embedding model of the service: built once, shared read-only.
    let embedder: Arc<dyn Embedder> = Arc::new(HashedTrigramEmbedder::default());
    let summarizer = Summarizer::new(args.summary_mode, Arc::clone(&embedder));

    let config = PipelineConfig {
        local_lang: args.local_lang,
        cross_lang: args.cross_lang,
        search_cap: args.search_cap,
        merge_limit: args.merge_limit,
        top_n: args.top_n,
        thresholds: RelevanceThresholds {
            high: args.high_threshold,
            medium: args.medium_threshold,
        },
        cache_capacity: args.cache_capacity,
    };
    let pipeline = Arc::new(SearchPipeline::new(wiki, embedder, summarizer, config));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!(%addr, "starting wikisift");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, server::router(pipeline)).await?;
    Ok(())
}
