use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{sync::Arc, time::Duration};

use crate::{
    store::{MemoryPostStore, PgPostStore, PostStore},
    Config,
};

pub async fn create_pool(database_url: &str) -> crate::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> crate::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Opens the store selected by `config`: Postgres when a database URL is
/// set, otherwise an empty in-memory store.
pub async fn open_store(config: &Config) -> crate::Result<Arc<dyn PostStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            tracing::info!("Using Postgres post store");
            Ok(Arc::new(PgPostStore::new(pool)))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory post store");
            Ok(Arc::new(MemoryPostStore::new()))
        }
    }
}
