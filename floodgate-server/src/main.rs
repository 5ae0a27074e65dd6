use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use floodgate_server::config::Config;
use floodgate_server::metrics::Metrics;
use floodgate_server::middleware::AppState;
use floodgate_server::{actor, routes};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from environment variables and CLI arguments
    let config = Config::from_env_and_args()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("floodgate={}", config.log_level).parse()?)
                .add_directive(format!("floodgate_server={}", config.log_level).parse()?),
        )
        .init();

    // The registry lives on a single actor task; request handlers share a handle
    let limiter = floodgate::RateLimiter::builder(config.policy()?)
        .capacity(config.registry.capacity)
        .sweep_interval(Duration::from_secs(config.registry.sweep_interval))
        .idle_timeout(Duration::from_secs(config.registry.idle_timeout))
        .build();
    let handle = actor::spawn(limiter, config.buffer_size);

    let state = AppState {
        limiter: handle,
        metrics: Arc::new(Metrics::new()),
    };
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", config.listen.host, config.listen.port).parse()?;
    tracing::info!("floodgate listening on {}", addr);
    tracing::info!(
        "admission policy: burst {}, one token per {} ms",
        config.limit.burst,
        config.limit.refill_ms
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Connect-info keeps the peer address available to the extraction fallback
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
