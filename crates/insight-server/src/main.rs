mod cache;
mod config;
mod error;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::ResultCache;
use config::Config;
use insight_common::redis::RedisCache;
use insight_common::store::{KvStore, MemoryStore};
use insight_grading::Grader;
use insight_ranking::RankingPipeline;
use server::InsightServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting insight MCP server");

    let config = Config::from_env()?;
    info!(
        redis = config.redis_url.is_some(),
        exposure = %config.exposure,
        cache_ttl_secs = config.result_cache_ttl_secs,
        scorer = %config.ranking.scorer,
        percentile = config.ranking.percentile,
        min_acceptable = config.ranking.min_acceptable,
        "configuration loaded"
    );

    // Redis when configured and reachable, otherwise process memory
    let store: Arc<dyn KvStore> = match config.redis_url.as_deref() {
        Some(url) => {
            let redis_cache = RedisCache::new(Some(url));
            if redis_cache.is_available().await {
                info!("redis connected");
                Arc::new(redis_cache)
            } else {
                info!("redis unavailable, caching in memory");
                Arc::new(MemoryStore::new())
            }
        }
        None => Arc::new(MemoryStore::new()),
    };
    let cache = Arc::new(ResultCache::new(
        store,
        config.result_cache_ttl_secs,
        config.exposure,
    ));

    let ranking = RankingPipeline::new(config.ranking.clone())?;
    let grader = Grader::new(config.grading.clone())?;
    let server = InsightServer::new(ranking, grader, cache, config.exposure);

    if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                tracing::info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                tracing::info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
