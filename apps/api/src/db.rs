use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::models::{ContactForm, Enrollment, Learning, Skill, SkillPost, SkillProgress};
use crate::store::{Document, PgDocumentStore};

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store backend")?;

    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates one table per record family if missing. Safe to run on every boot.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    ensure::<ContactForm>(pool).await?;
    ensure::<Enrollment>(pool).await?;
    ensure::<Learning>(pool).await?;
    ensure::<Skill>(pool).await?;
    ensure::<SkillPost>(pool).await?;
    ensure::<SkillProgress>(pool).await?;
    Ok(())
}

async fn ensure<T: Document>(pool: &PgPool) -> Result<()> {
    PgDocumentStore::<T>::new(pool.clone())
        .ensure_collection()
        .await
        .with_context(|| format!("Failed to create collection '{}'", T::COLLECTION))
}
