use std::sync::Arc;

use anyhow::Context;

use warehouse_api::app::{build_app, services::AppServices};
use warehouse_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env();
    warehouse_observability::init(config.log_format);
    config.log_rejected();

    let services = AppServices::from_config(&config).context("failed to seed demo data")?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
