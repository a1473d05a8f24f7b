/// Database connection pool
///
/// PostgreSQL pool construction via sqlx with a startup health check, so a
/// misconfigured DATABASE_URL fails at boot instead of on the first
/// request.
///
/// # Example
///
/// ```no_run
/// use docket_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let config = DatabaseConfig {
///     url: std::env::var("DATABASE_URL").unwrap(),
///     ..Default::default()
/// };
/// let pool = create_pool(config).await?;
/// # Ok(())
/// # }
/// ```
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the connection pool.
///
/// Timeouts are in seconds for ease of wiring from environment variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections to keep warm
    pub min_connections: u32,

    /// Timeout for acquiring a connection (seconds)
    pub connect_timeout_seconds: u64,

    /// Idle time before a connection is closed (seconds), None = never
    pub idle_timeout_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
        }
    }
}

/// Creates the pool and verifies connectivity with a round-trip query.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable,
/// or the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "creating database pool"
    );

    let mut options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

    if let Some(idle) = config.idle_timeout_seconds {
        options = options.idle_timeout(Duration::from_secs(idle));
    }

    let pool = options.connect(&config.url).await?;

    health_check(&pool).await?;
    info!("database pool ready");

    Ok(pool)
}

/// Verifies the database answers a trivial query.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    debug_assert_eq!(one, 1);
    Ok(())
}
