use serde::{Deserialize, Serialize};

use super::recipe::Recipe;

/// A named collection of recipe snapshots that can be planned onto dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub description: String,
    pub recipes: Vec<Recipe>,
}

impl Menu {
    /// Case-insensitive substring match on the menu name, its description,
    /// or the name of any embedded recipe. The term is taken verbatim, so an
    /// empty term matches everything and whitespace must appear in the text.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self
                .recipes
                .iter()
                .any(|recipe| recipe.name.to_lowercase().contains(&term))
    }

    pub fn total_minutes(&self) -> u32 {
        self.recipes.iter().map(Recipe::total_minutes).sum()
    }

    /// Image of the first recipe, used as the menu thumbnail.
    pub fn cover_image(&self) -> Option<&str> {
        self.recipes
            .first()
            .map(|recipe| recipe.image.as_str())
            .filter(|image| !image.is_empty())
    }

    pub fn servings(&self) -> Option<u32> {
        self.recipes
            .first()
            .map(|recipe| recipe.servings)
            .filter(|servings| *servings > 0)
    }
}

/// Read-only rendering of a menu for the details page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub recipes: Vec<RecipeDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub total_minutes: u32,
    pub servings: u32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl From<Menu> for MenuDetails {
    fn from(menu: Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            description: menu.description,
            recipes: menu.recipes.into_iter().map(RecipeDetails::from).collect(),
        }
    }
}

impl From<Recipe> for RecipeDetails {
    fn from(recipe: Recipe) -> Self {
        Self {
            total_minutes: recipe.total_minutes(),
            ingredients: recipe.ingredients.iter().map(|i| i.display_line()).collect(),
            image: Some(recipe.image).filter(|image| !image.is_empty()),
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            servings: recipe.servings,
            instructions: recipe.instructions,
        }
    }
}

/// Query params for GET /api/menus.
#[derive(Debug, Default, Deserialize)]
pub struct MenuSearchQuery {
    pub q: Option<String>,
}
