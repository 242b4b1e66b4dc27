use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 20;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connects to the backing store. Fails fast if it is unreachable.
pub async fn create_pool(database_url: &str) -> crate::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::info!(max_connections = MAX_CONNECTIONS, "Connected to PostgreSQL");
    Ok(pool)
}

/// Applies the embedded schema migrations in `migrations/`.
pub async fn migrate(pool: &PgPool) -> crate::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
