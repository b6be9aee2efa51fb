use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{new_document_id, DocumentStore};
use crate::{
    error::StoreError,
    models::{calendar::CalendarEntryDoc, menu::Menu, recipe::Recipe},
    services::dates,
};

/// Operations a [`MemoryStore`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListRecipes,
    ListMenus,
    GetMenu,
    ListCalendar,
    CreateCalendar,
    DeleteCalendar,
}

#[derive(Default)]
struct Collections {
    recipes: Vec<Recipe>,
    menus: Vec<Menu>,
    calendar: Vec<CalendarEntryDoc>,
}

/// In-memory document store. Used by the `memory` backend and as the fake
/// behind service and router tests, with optional per-menu lookup latency
/// and injected failures.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
    menu_latency: std::sync::Mutex<HashMap<String, Duration>>,
    failing: std::sync::Mutex<HashSet<Operation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every `get_menu` for `menu_id` by `delay`.
    pub fn set_menu_latency(&self, menu_id: &str, delay: Duration) {
        if let Ok(mut latency) = self.menu_latency.lock() {
            latency.insert(menu_id.to_string(), delay);
        }
    }

    pub fn fail(&self, op: Operation) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(op);
        }
    }

    pub fn recover(&self, op: Operation) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(&op);
        }
    }

    /// Insert a raw calendar document, bypassing date formatting. Used to
    /// reproduce legacy or dangling data.
    pub async fn insert_calendar_doc(&self, doc: CalendarEntryDoc) {
        self.data.write().await.calendar.push(doc);
    }

    pub async fn remove_menu(&self, id: &str) {
        self.data.write().await.menus.retain(|menu| menu.id != id);
    }

    fn check(&self, op: Operation) -> Result<(), StoreError> {
        let failing = self
            .failing
            .lock()
            .map(|failing| failing.contains(&op))
            .unwrap_or(false);
        if failing {
            return Err(StoreError::Unavailable(format!("{op:?} rejected")));
        }
        Ok(())
    }

    fn latency_for(&self, menu_id: &str) -> Option<Duration> {
        self.menu_latency
            .lock()
            .ok()
            .and_then(|latency| latency.get(menu_id).copied())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        self.check(Operation::ListRecipes)?;
        Ok(self.data.read().await.recipes.clone())
    }

    async fn list_menus(&self) -> Result<Vec<Menu>, StoreError> {
        self.check(Operation::ListMenus)?;
        Ok(self.data.read().await.menus.clone())
    }

    async fn get_menu(&self, id: &str) -> Result<Option<Menu>, StoreError> {
        if let Some(delay) = self.latency_for(id) {
            tokio::time::sleep(delay).await;
        }
        self.check(Operation::GetMenu)?;
        let data = self.data.read().await;
        Ok(data.menus.iter().find(|menu| menu.id == id).cloned())
    }

    async fn list_calendar_entries(&self) -> Result<Vec<CalendarEntryDoc>, StoreError> {
        self.check(Operation::ListCalendar)?;
        Ok(self.data.read().await.calendar.clone())
    }

    async fn create_calendar_entry(
        &self,
        date: NaiveDate,
        menu_id: &str,
    ) -> Result<CalendarEntryDoc, StoreError> {
        self.check(Operation::CreateCalendar)?;
        let doc = CalendarEntryDoc {
            id: new_document_id(),
            date: dates::format_storage(date),
            menu_id: menu_id.to_string(),
        };
        self.data.write().await.calendar.push(doc.clone());
        Ok(doc)
    }

    async fn delete_calendar_entry(&self, id: &str) -> Result<(), StoreError> {
        self.check(Operation::DeleteCalendar)?;
        self.data.write().await.calendar.retain(|doc| doc.id != id);
        Ok(())
    }

    async fn put_recipe(&self, recipe: &Recipe) -> Result<Recipe, StoreError> {
        let mut recipe = recipe.clone();
        if recipe.id.is_empty() {
            recipe.id = new_document_id();
        }
        let mut data = self.data.write().await;
        match data.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe.clone(),
            None => data.recipes.push(recipe.clone()),
        }
        Ok(recipe)
    }

    async fn put_menu(&self, menu: &Menu) -> Result<Menu, StoreError> {
        let mut menu = menu.clone();
        if menu.id.is_empty() {
            menu.id = new_document_id();
        }
        let mut data = self.data.write().await;
        match data.menus.iter_mut().find(|m| m.id == menu.id) {
            Some(existing) => *existing = menu.clone(),
            None => data.menus.push(menu.clone()),
        }
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn calendar_documents_round_trip_in_insertion_order() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let first = store.create_calendar_entry(date, "m1").await.unwrap();
        let second = store.create_calendar_entry(date, "m2").await.unwrap();

        assert_eq!(first.date, "2024-03-10");
        assert_ne!(first.id, second.id);

        let listed = store.list_calendar_entries().await.unwrap();
        assert_eq!(listed, vec![first.clone(), second]);

        store.delete_calendar_entry(&first.id).await.unwrap();
        store.delete_calendar_entry("missing").await.unwrap();
        assert_eq!(store.list_calendar_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn put_menu_generates_ids_and_replaces() {
        let store = MemoryStore::new();
        let mut menu = store
            .put_menu(&Menu {
                name: "Brunch".into(),
                ..Menu::default()
            })
            .await
            .unwrap();
        assert!(!menu.id.is_empty());

        menu.name = "Late Brunch".into();
        store.put_menu(&menu).await.unwrap();

        let menus = store.list_menus().await.unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(store.get_menu(&menu.id).await.unwrap().unwrap().name, "Late Brunch");
        assert!(store.get_menu("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn injected_failures_can_be_cleared() {
        let store = MemoryStore::new();
        store.fail(Operation::ListMenus);
        assert!(matches!(store.list_menus().await, Err(StoreError::Unavailable(_))));
        store.recover(Operation::ListMenus);
        assert!(store.list_menus().await.is_ok());
    }
}
