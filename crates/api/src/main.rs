use std::sync::Arc;

use anyhow::Context;

use larder_api::app::{build_app, services};
use larder_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    larder_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = services::build_services(&config).await?;
    let app = build_app(Arc::new(services), config.jwt_secret.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
