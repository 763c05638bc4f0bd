use anyhow::Context;
use keyword_article_service::{ServiceConfig, create_app};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing, JSON by default or human-readable with LOG_FORMAT=pretty
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "keyword_article_service=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServiceConfig::from_env().context("Invalid service configuration")?;
    let address = config.bind_address();
    info!(
        model = %config.model,
        pacing_ms = config.pacing.delay.as_millis() as u64,
        default_url = %config.default_url,
        "Starting keyword article service"
    );

    let app = create_app(config);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", listener.local_addr()?);
    info!("  GET  /         - Service status");
    info!("  GET  /health   - Health check");
    info!("  POST /generate - Generate keyword articles");

    axum::serve(listener, app).await?;

    Ok(())
}
