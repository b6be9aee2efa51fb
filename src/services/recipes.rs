use tracing::error;

use crate::{db::DocumentStore, error::StoreError, models::recipe::Recipe, services::metrics};

pub struct RecipeService;

impl RecipeService {
    /// All recipes, sorted by name.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Recipe>, StoreError> {
        let mut recipes = store.list_recipes().await.inspect_err(|e| {
            metrics::store_failure("list_recipes");
            error!("Error fetching recipes: {e}");
        })?;
        recipes.sort_by_key(|recipe| recipe.name.to_lowercase());
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn recipes_come_back_sorted() {
        let store = MemoryStore::new();
        for name in ["waffles", "Apple pie", "muffins"] {
            store
                .put_recipe(&Recipe {
                    name: name.into(),
                    ..Recipe::default()
                })
                .await
                .unwrap();
        }
        let names: Vec<_> = RecipeService::list(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Apple pie", "muffins", "waffles"]);
    }
}
