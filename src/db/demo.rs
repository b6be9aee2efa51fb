//! Demo recipes and menus used by the `seed-demo` binary and by `SEED_DEMO`
//! on the memory backend.

use chrono::{Duration, NaiveDate, Weekday};

use super::DocumentStore;
use crate::{
    models::{
        menu::Menu,
        recipe::{Ingredient, Recipe},
    },
    services::dates,
};

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub recipes: usize,
    pub menus: usize,
    pub calendar_entries: usize,
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    name: &str,
    description: &str,
    cuisine: &str,
    category: &str,
    prep: &str,
    cook: &str,
    servings: u32,
    ingredients: &[&str],
    instructions: &[&str],
) -> Recipe {
    Recipe {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        cuisine: cuisine.into(),
        category: category.into(),
        image: format!("https://images.example.com/recipes/{id}.jpg"),
        prep_time: prep.into(),
        cook_time: cook.into(),
        servings,
        ingredients: ingredients.iter().map(|line| Ingredient::parse_line(line)).collect(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "demo-pancakes",
            "Buttermilk Pancakes",
            "Fluffy weekend pancakes",
            "American",
            "Breakfast",
            "10",
            "15",
            4,
            &["2 cups flour", "2 cups buttermilk", "2 eggs", "1 tbsp sugar", "1 pinch salt"],
            &["Whisk dry ingredients", "Fold in buttermilk and eggs", "Cook on a hot griddle"],
        ),
        recipe(
            "demo-tomato-soup",
            "Tomato Basil Soup",
            "Roasted tomatoes blended with fresh basil",
            "Italian",
            "Soup",
            "15",
            "35",
            4,
            &["1 kg tomatoes", "1 onion", "3 cloves garlic", "fresh basil"],
            &["Roast tomatoes, onion and garlic", "Blend with basil", "Season and simmer"],
        ),
        recipe(
            "demo-carbonara",
            "Spaghetti Carbonara",
            "Classic Roman pasta",
            "Italian",
            "Main",
            "10",
            "15",
            2,
            &["200 g spaghetti", "100 g guanciale", "2 eggs", "50 g pecorino"],
            &["Boil pasta", "Crisp guanciale", "Toss with eggs and cheese off the heat"],
        ),
        recipe(
            "demo-green-salad",
            "Green Salad",
            "Crisp leaves with lemon vinaigrette",
            "French",
            "Side",
            "10",
            "0",
            4,
            &["1 head lettuce", "1 lemon", "3 tbsp olive oil"],
            &["Wash leaves", "Whisk lemon and oil", "Dress just before serving"],
        ),
        recipe(
            "demo-tiramisu",
            "Tiramisu",
            "Coffee-soaked ladyfingers with mascarpone",
            "Italian",
            "Dessert",
            "30",
            "0",
            6,
            &["250 g mascarpone", "3 eggs", "1 cup espresso", "24 ladyfingers"],
            &["Whip mascarpone with yolks", "Dip ladyfingers in espresso", "Layer and chill"],
        ),
    ]
}

fn pick(recipes: &[Recipe], ids: &[&str]) -> Vec<Recipe> {
    ids.iter()
        .filter_map(|id| recipes.iter().find(|r| r.id == *id).cloned())
        .collect()
}

pub fn menus(recipes: &[Recipe]) -> Vec<Menu> {
    vec![
        Menu {
            id: "demo-weekend-brunch".into(),
            name: "Weekend Brunch".into(),
            description: "Slow morning with something sweet".into(),
            recipes: pick(recipes, &["demo-pancakes", "demo-green-salad"]),
        },
        Menu {
            id: "demo-italian-night".into(),
            name: "Italian Night".into(),
            description: "Three courses from Rome".into(),
            recipes: pick(recipes, &["demo-tomato-soup", "demo-carbonara", "demo-tiramisu"]),
        },
        Menu {
            id: "demo-light-lunch".into(),
            name: "Light Lunch".into(),
            description: "Soup and salad".into(),
            recipes: pick(recipes, &["demo-tomato-soup", "demo-green-salad"]),
        },
    ]
}

/// Insert the demo documents and plan two menus into the week of `today`.
/// Menus already planned on their demo day are not planned again.
pub async fn seed(
    store: &dyn DocumentStore,
    today: NaiveDate,
    week_start: Weekday,
) -> anyhow::Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    let recipes = recipes();
    for recipe in &recipes {
        store.put_recipe(recipe).await?;
        summary.recipes += 1;
    }

    let menus = menus(&recipes);
    for menu in &menus {
        store.put_menu(menu).await?;
        summary.menus += 1;
    }

    let start = dates::week_start(today, week_start)
        .ok_or_else(|| anyhow::anyhow!("no week start for {today}"))?;
    let existing = store.list_calendar_entries().await?;
    for (offset, menu_id) in [(0, "demo-weekend-brunch"), (3, "demo-italian-night")] {
        let date = start
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| anyhow::anyhow!("demo date out of range for {today}"))?;
        let already_planned = existing
            .iter()
            .any(|doc| doc.menu_id == menu_id && dates::normalize(&doc.date) == Some(date));
        if already_planned {
            continue;
        }
        store.create_calendar_entry(date, menu_id).await?;
        summary.calendar_entries += 1;
    }

    Ok(summary)
}
