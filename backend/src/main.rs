//! Catalog list service
//!
//! Serves the demo catalog with `filterBy` / `sortBy` support on every list
//! endpoint.

use std::net::SocketAddr;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_filter::api::{self, AppState};
use catalog_filter::catalog;
use catalog_filter::config::Config;
use catalog_filter::db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_filter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting catalog list service");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    tracing::info!(url = %config.database_url, "Database connected");

    if config.seed_demo_data {
        catalog::seed(db.pool())
            .await
            .context("failed to seed demo catalog")?;
    } else {
        catalog::create_tables(db.pool())
            .await
            .context("failed to create catalog tables")?;
    }

    let state = AppState {
        db: db.pool().clone(),
    };
    let app = api::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
