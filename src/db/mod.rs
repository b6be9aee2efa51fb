pub mod demo;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{
    config::{Config, StoreBackend},
    error::StoreError,
    models::{calendar::CalendarEntryDoc, menu::Menu, recipe::Recipe},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Narrow document-store interface over the `recipes`, `menus` and
/// `calendar` collections. Only whole-collection reads and by-id access are
/// offered; searching happens in application code.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn list_menus(&self) -> Result<Vec<Menu>, StoreError>;

    /// `Ok(None)` when no menu has this id.
    async fn get_menu(&self, id: &str) -> Result<Option<Menu>, StoreError>;

    /// All calendar documents in creation order.
    async fn list_calendar_entries(&self) -> Result<Vec<CalendarEntryDoc>, StoreError>;

    /// Insert a calendar document under a freshly generated id.
    async fn create_calendar_entry(
        &self,
        date: NaiveDate,
        menu_id: &str,
    ) -> Result<CalendarEntryDoc, StoreError>;

    /// Deleting an id that does not exist succeeds.
    async fn delete_calendar_entry(&self, id: &str) -> Result<(), StoreError>;

    /// Insert or replace a recipe; an empty id gets a generated one.
    async fn put_recipe(&self, recipe: &Recipe) -> Result<Recipe, StoreError>;

    /// Insert or replace a menu; an empty id gets a generated one.
    async fn put_menu(&self, menu: &Menu) -> Result<Menu, StoreError>;
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Build the configured store, applying migrations for PostgreSQL.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;
            let pool = create_pool(url, config.db_max_connections).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connected and migrations applied");
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
