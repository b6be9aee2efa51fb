use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use super::{new_document_id, DocumentStore};
use crate::{
    error::StoreError,
    models::{calendar::CalendarEntryDoc, menu::Menu, recipe::Recipe},
    services::dates,
};

/// PostgreSQL-backed store. Recipes and menus live as JSONB documents keyed by
/// id; calendar documents are plain rows since their shape is fixed.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Remove every document from all three collections.
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::raw_sql("TRUNCATE calendar, menus, recipes")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_document<T: Serialize>(
        &self,
        table: &'static str,
        id: &str,
        doc: &T,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_value(doc).map_err(|source| StoreError::Encode {
            collection: table,
            source,
        })?;
        sqlx::query(&format!(
            "INSERT INTO {table} (id, data) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()"
        ))
        .bind(id)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(
    collection: &'static str,
    id: &str,
    data: Value,
) -> Result<T, StoreError> {
    serde_json::from_value(data).map_err(|source| StoreError::Decode {
        collection,
        id: id.to_string(),
        source,
    })
}

fn decode_recipe(id: String, data: Value) -> Result<Recipe, StoreError> {
    let mut recipe: Recipe = decode("recipes", &id, data)?;
    recipe.id = id;
    Ok(recipe)
}

fn decode_menu(id: String, data: Value) -> Result<Menu, StoreError> {
    let mut menu: Menu = decode("menus", &id, data)?;
    menu.id = id;
    Ok(menu)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, data FROM recipes ORDER BY data->>'name', id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|(id, data)| decode_recipe(id, data))
            .collect()
    }

    async fn list_menus(&self) -> Result<Vec<Menu>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Value)>(
            "SELECT id, data FROM menus ORDER BY data->>'name', id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|(id, data)| decode_menu(id, data))
            .collect()
    }

    async fn get_menu(&self, id: &str) -> Result<Option<Menu>, StoreError> {
        let row = sqlx::query_as::<_, (String, Value)>("SELECT id, data FROM menus WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(id, data)| decode_menu(id, data)).transpose()
    }

    async fn list_calendar_entries(&self) -> Result<Vec<CalendarEntryDoc>, StoreError> {
        let entries = sqlx::query_as::<_, CalendarEntryDoc>(
            "SELECT id, date, menu_id FROM calendar ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn create_calendar_entry(
        &self,
        date: NaiveDate,
        menu_id: &str,
    ) -> Result<CalendarEntryDoc, StoreError> {
        let entry = sqlx::query_as::<_, CalendarEntryDoc>(
            "INSERT INTO calendar (id, date, menu_id)
             VALUES ($1, $2, $3)
             RETURNING id, date, menu_id",
        )
        .bind(new_document_id())
        .bind(dates::format_storage(date))
        .bind(menu_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn delete_calendar_entry(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM calendar WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn put_recipe(&self, recipe: &Recipe) -> Result<Recipe, StoreError> {
        let mut recipe = recipe.clone();
        if recipe.id.is_empty() {
            recipe.id = new_document_id();
        }
        self.upsert_document("recipes", &recipe.id, &recipe).await?;
        Ok(recipe)
    }

    async fn put_menu(&self, menu: &Menu) -> Result<Menu, StoreError> {
        let mut menu = menu.clone();
        if menu.id.is_empty() {
            menu.id = new_document_id();
        }
        self.upsert_document("menus", &menu.id, &menu).await?;
        Ok(menu)
    }
}
