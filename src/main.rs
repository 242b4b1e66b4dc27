use std::sync::Arc;

use anyhow::Context;
use simple_blog::{
    config::Environment,
    store::{MemoryPostStore, PgPostStore, PostStore},
    telemetry, web, Config, PostRepository,
};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init(Environment::Development);
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    telemetry::init(config.environment);

    if let Err(e) = run(config).await {
        tracing::error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting simple-blog ({})", config.environment);
    tracing::info!("Web server will listen on: {}", config.web_addr());

    let store: Arc<dyn PostStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            let db_pool = simple_blog::db::create_pool(database_url)
                .await
                .context("connecting to the backing store")?;
            simple_blog::db::migrate(&db_pool)
                .await
                .context("running database migrations")?;
            Arc::new(PgPostStore::new(db_pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, posts are kept in memory only");
            Arc::new(MemoryPostStore::new())
        }
    };

    let posts = PostRepository::new(store, config.default_author.clone());
    let app_state = web::AppState::new(posts, config.page_size);

    web::serve(config.web_addr(), app_state)
        .await
        .context("web server failed")?;

    Ok(())
}
