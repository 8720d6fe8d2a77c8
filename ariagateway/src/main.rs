use ariaclient::UpstreamClient;
use ariagateway::routes::{GatewayState, create_router};
use ariagateway::get_config;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = get_config();

    let music = UpstreamClient::builder()
        .base_url(config.get_upstream_url())
        .timeout(config.get_upstream_timeout())
        .build()?;
    let sponsor = UpstreamClient::builder()
        .base_url(config.get_sponsor_url())
        .timeout(config.get_upstream_timeout())
        .build()?;

    info!("Primary upstream: {}", music.base_url());
    info!("Sponsor upstream: {}", sponsor.base_url());

    let state = GatewayState {
        music: Arc::new(music),
        sponsor: Arc::new(sponsor),
    };

    let router = Router::new().nest("/api", create_router(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.get_http_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Aria gateway listening on http://{}", addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Ctrl+C received, shutting down");
        })
        .await?;

    Ok(())
}
