use thiserror::Error;
use tracing::error;

use crate::{
    db::DocumentStore,
    error::StoreError,
    models::menu::{Menu, MenuDetails},
    services::metrics,
};

#[derive(Debug, Error)]
pub enum MenuLookupError {
    #[error("Menu {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct MenuService;

impl MenuService {
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Menu>, StoreError> {
        store.list_menus().await.inspect_err(|e| {
            metrics::store_failure("list_menus");
            error!("Error fetching menus: {e}");
        })
    }

    /// Menus matching `term` on name, description or any recipe name.
    pub fn filter<'a>(menus: &'a [Menu], term: &str) -> Vec<&'a Menu> {
        menus.iter().filter(|menu| menu.matches(term)).collect()
    }

    pub async fn details(store: &dyn DocumentStore, id: &str) -> Result<MenuDetails, MenuLookupError> {
        match store.get_menu(id).await {
            Ok(Some(menu)) => Ok(menu.into()),
            Ok(None) => {
                error!(menu_id = id, "Menu not found");
                Err(MenuLookupError::NotFound(id.to_string()))
            }
            Err(e) => {
                metrics::store_failure("get_menu");
                error!(menu_id = id, "Error fetching menu: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{memory::Operation, MemoryStore},
        models::recipe::Recipe,
    };

    fn menu(id: &str, name: &str, description: &str, recipes: &[&str]) -> Menu {
        Menu {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            recipes: recipes
                .iter()
                .map(|r| Recipe {
                    name: r.to_string(),
                    ..Recipe::default()
                })
                .collect(),
        }
    }

    #[test]
    fn filter_finds_menu_by_recipe_name_only() {
        let menus = vec![
            menu("1", "Weeknight", "Quick dinners", &["Shakshuka", "Flatbread"]),
            menu("2", "Holiday", "Festive spread", &["Glazed Ham"]),
        ];

        let hits = MenuService::filter(&menus, "shak");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        assert_eq!(MenuService::filter(&menus, "FESTIVE")[0].id, "2");
        assert_eq!(MenuService::filter(&menus, "").len(), 2);
        assert!(MenuService::filter(&menus, "sushi").is_empty());
    }

    #[tokio::test]
    async fn unknown_menu_is_not_found() {
        let store = MemoryStore::new();
        let err = MenuService::details(&store, "missing").await.unwrap_err();
        assert!(matches!(err, MenuLookupError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn store_failures_are_distinguished_from_not_found() {
        let store = MemoryStore::new();
        store.fail(Operation::GetMenu);
        let err = MenuService::details(&store, "any").await.unwrap_err();
        assert!(matches!(err, MenuLookupError::Store(_)));
    }

    #[tokio::test]
    async fn details_load_existing_menu() {
        let store = MemoryStore::new();
        store
            .put_menu(&menu("m", "Picnic", "Outdoors", &["Sandwiches"]))
            .await
            .unwrap();
        let details = MenuService::details(&store, "m").await.unwrap();
        assert_eq!(details.name, "Picnic");
        assert_eq!(details.recipes[0].name, "Sandwiches");
    }
}
