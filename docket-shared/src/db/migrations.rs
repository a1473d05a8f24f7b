/// Migration runner
///
/// Schema migrations live in `docket-shared/migrations/` and are embedded
/// at compile time. Besides the tables, the migrations install the
/// row-security policies that express the visibility predicates inside
/// the store itself (see `0002_row_security.sql`), so even a client that
/// bypasses this crate cannot read across the visibility boundary.
///
/// # Example
///
/// ```no_run
/// use docket_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply; already-applied
/// migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("running database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("database schema up to date");
            Ok(())
        }
        Err(e) => {
            warn!("migration failed: {}", e);
            Err(e)
        }
    }
}
