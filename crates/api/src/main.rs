use std::sync::Arc;

use anyhow::Context;

use stockcast_api::config::AppConfig;
use stockcast_catalog::Catalog;
use stockcast_infra::ForecastService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockcast_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let batch = config.batch_config().context("invalid forecast settings")?;

    if config.seed.is_none() {
        tracing::info!("STOCKCAST_SEED not set; forecasts are not reproducible across requests");
    }

    let service = Arc::new(ForecastService::new(Catalog::sample(), batch));
    let app = stockcast_api::app::build_app(service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
