//! # Docket API Server
//!
//! HTTP surface of the Docket access engine. Serves the role-management
//! operations, permission introspection, and row-filtered record reads
//! consumed by the application's CRUD/UI layer.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p docket-api
//! ```

use docket_api::{
    app::{build_router, AppState},
    config::Config,
};
use docket_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docket_api=info,docket_shared=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Docket API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let addr = format!("{}:{}", config.api.host, config.api.port);
    let app = build_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}
