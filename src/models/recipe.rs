use fraction::Fraction;
use serde::{Deserialize, Serialize};

use super::quantity::{self, add_quantities, format_quantity, parse_quantity};

/// Unit words recognised when splitting a free-text ingredient line.
const UNIT_WORDS: &[&str] = &[
    "cup", "cups", "tbsp", "tablespoon", "tablespoons", "tsp", "teaspoon", "teaspoons", "g",
    "gram", "grams", "kg", "mg", "ml", "l", "liter", "liters", "oz", "ounce", "ounces", "lb",
    "lbs", "pound", "pounds", "clove", "cloves", "pinch", "can", "cans", "slice", "slices",
    "piece", "pieces", "bunch", "handful", "dash",
];

/// A recipe document. Menus embed copies of these, so edits never propagate
/// into menus that already contain the recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cuisine: String,
    pub category: String,
    pub image: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Preparation plus cooking minutes. Unparseable times count as zero.
    pub fn total_minutes(&self) -> u32 {
        leading_int(&self.prep_time) + leading_int(&self.cook_time)
    }
}

/// Reads the leading run of digits, so "25 min" is 25 and "about 10" is 0.
fn leading_int(raw: &str) -> u32 {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Structured ingredient line. Legacy documents stored plain strings such as
/// `"2 cups flour"`; those are split into quantity, unit and name on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawIngredient")]
pub struct Ingredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "quantity::serialize")]
    pub quantity: Option<Fraction>,
    pub unit: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Text(String),
    Structured {
        #[serde(default)]
        name: String,
        #[serde(default)]
        quantity: Option<RawQuantity>,
        #[serde(default)]
        unit: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        match raw {
            RawIngredient::Text(line) => Ingredient::parse_line(&line),
            RawIngredient::Structured { name, quantity, unit } => Ingredient {
                name: name.trim().to_string(),
                quantity: quantity.and_then(|q| match q {
                    RawQuantity::Number(n) => parse_quantity(&n.to_string()),
                    RawQuantity::Text(t) => parse_quantity(&t),
                }),
                unit: unit.unwrap_or_default().trim().to_string(),
            },
        }
    }
}

impl Ingredient {
    /// Split a free-text line into quantity, unit and name.
    ///
    /// A mixed number such as `"1 1/2 cups milk"` is read as 3/2. The unit is
    /// only taken when the word after the quantity is a known unit.
    pub fn parse_line(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = tokens.first().and_then(|t| parse_quantity(t)) else {
            return Ingredient {
                name: tokens.join(" "),
                quantity: None,
                unit: String::new(),
            };
        };

        let mut quantity = first;
        let mut rest = &tokens[1..];
        if let Some(sum) = rest
            .first()
            .filter(|t| t.contains('/') && !tokens[0].contains('/'))
            .and_then(|t| parse_quantity(t))
            .and_then(|fraction| add_quantities(&quantity, &fraction))
        {
            quantity = sum;
            rest = &rest[1..];
        }

        let mut unit = String::new();
        if let Some(word) = rest.first() {
            let bare = word.trim_end_matches('.').to_ascii_lowercase();
            if UNIT_WORDS.contains(&bare.as_str()) && rest.len() > 1 {
                unit = word.trim_end_matches('.').to_string();
                rest = &rest[1..];
            }
        }

        Ingredient {
            name: rest.join(" "),
            quantity: Some(quantity),
            unit,
        }
    }

    /// Human readable line, e.g. `"2 cups flour"` or `"1/2 tsp salt"`.
    pub fn display_line(&self) -> String {
        let quantity = self.quantity.as_ref().map(format_quantity);
        [quantity.as_deref(), Some(self.unit.as_str()), Some(self.name.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
