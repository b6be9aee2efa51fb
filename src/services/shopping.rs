use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};
use fraction::Fraction;
use serde::Serialize;
use tracing::warn;

use crate::{
    db::DocumentStore,
    models::{
        calendar::CalendarEntry,
        quantity::{self, add_quantities, format_quantity},
    },
    services::{
        calendar::{CalendarError, CalendarService},
        dates,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "quantity::serialize")]
    pub quantity: Option<Fraction>,
    pub unit: String,
    /// e.g. "450 g spaghetti"
    pub line: String,
    /// Menus this item is needed for, in first-seen order.
    pub menus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    pub items: Vec<ShoppingItem>,
}

pub struct ShoppingService;

impl ShoppingService {
    /// Shopping list for every menu planned in the week containing `pivot`.
    pub async fn for_week(
        store: &dyn DocumentStore,
        pivot: NaiveDate,
        first_day: Weekday,
    ) -> Result<ShoppingList, CalendarError> {
        let out_of_range = || CalendarError::InvalidDate(pivot.to_string());
        let start = dates::week_start(pivot, first_day).ok_or_else(out_of_range)?;
        let days = dates::week_days(start).ok_or_else(out_of_range)?;
        let label = dates::week_label(start).ok_or_else(out_of_range)?;

        let entries = CalendarService::load_entries(store).await?;
        let in_week: Vec<&CalendarEntry> = days
            .iter()
            .flat_map(|day| CalendarService::entries_on(&entries, *day))
            .collect();

        Ok(ShoppingList {
            start,
            end: days[6],
            label,
            items: Self::aggregate(&in_week),
        })
    }

    /// Merge ingredient lines that share a name and unit (case-insensitive),
    /// summing their quantities exactly. Lines without a quantity appear once.
    pub fn aggregate(entries: &[&CalendarEntry]) -> Vec<ShoppingItem> {
        let mut groups: HashMap<(String, String), usize> = HashMap::new();
        let mut items: Vec<ShoppingItem> = Vec::new();

        for entry in entries {
            for recipe in &entry.menu.recipes {
                for ingredient in &recipe.ingredients {
                    let name = ingredient.name.trim();
                    if name.is_empty() {
                        continue;
                    }
                    let unit = ingredient.unit.trim();
                    let key = (name.to_lowercase(), unit.to_lowercase());

                    let index = *groups.entry(key).or_insert_with(|| {
                        items.push(ShoppingItem {
                            name: name.to_string(),
                            quantity: None,
                            unit: unit.to_string(),
                            line: String::new(),
                            menus: Vec::new(),
                        });
                        items.len() - 1
                    });
                    let item = &mut items[index];

                    item.quantity = match (item.quantity.take(), &ingredient.quantity) {
                        (Some(a), Some(b)) => add_quantities(&a, b).or_else(|| {
                            warn!(ingredient = name, unit, "Quantity too large to sum, keeping running total");
                            Some(a)
                        }),
                        (a, b) => a.or_else(|| b.clone()),
                    };
                    if !item.menus.contains(&entry.menu.name) {
                        item.menus.push(entry.menu.name.clone());
                    }
                }
            }
        }

        for item in &mut items {
            item.line = [
                item.quantity.as_ref().map(format_quantity).unwrap_or_default(),
                item.unit.clone(),
                item.name.clone(),
            ]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        }
        items
    }
}
