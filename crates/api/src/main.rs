use anyhow::Context;

use shopfloor_api::{app, config::{self, ApiConfig}};
use shopfloor_infra::DatabaseConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may set RUST_LOG and LOG_FORMAT, so it loads before logging init.
    let dotenv = config::load_dotenv();
    shopfloor_observability::init();
    if let Some(path) = dotenv.context("failed to load .env")? {
        tracing::info!(path = %path.display(), "loaded .env");
    }

    let api = ApiConfig::from_env().context("invalid API configuration")?;
    let db = DatabaseConfig::from_env().context("invalid database configuration")?;
    tracing::info!(?db, "starting");

    let services = app::services::AppServices::mysql(&db)
        .await
        .context("failed to initialise storage")?;
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(api.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", api.socket_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
