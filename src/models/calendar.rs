use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::menu::Menu;
use crate::services::dates;

/// A calendar document as persisted: one date paired with one menu reference.
/// `date` is always a `YYYY-MM-DD` string, never a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntryDoc {
    pub id: String,
    pub date: String,
    pub menu_id: String,
}

/// A calendar entry with its menu resolved at read time. The embedded menu is
/// a copy and is not kept in sync with the menus collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: String,
    pub date: String,
    pub menu_id: String,
    pub menu: Menu,
}

impl CalendarEntry {
    pub fn resolved(doc: CalendarEntryDoc, menu: Menu) -> Self {
        Self {
            id: doc.id,
            date: doc.date,
            menu_id: doc.menu_id,
            menu,
        }
    }

    /// Calendar day this entry belongs to, independent of any UTC offset.
    pub fn day(&self) -> Option<NaiveDate> {
        dates::normalize(&self.date)
    }

    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            id: self.id.clone(),
            date: self.date.clone(),
            menu_id: self.menu_id.clone(),
            menu_name: self.menu.name.clone(),
            image: self.menu.cover_image().map(str::to_string),
            total_minutes: self.menu.total_minutes(),
            servings: self.menu.servings(),
        }
    }
}

/// Body for POST /api/calendar/entries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Any ISO-8601 date or timestamp; only the calendar day is kept.
    pub date: String,
    pub menu_id: String,
}

/// Query params for GET /api/calendar and GET /api/shopping.
#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    /// Any day inside the desired week (e.g. "2024-03-10"). Defaults to today.
    pub date: Option<NaiveDate>,
}

/// Compact entry shown inside a day cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub id: String,
    pub date: String,
    pub menu_id: String,
    pub menu_name: String,
    pub image: Option<String>,
    pub total_minutes: u32,
    pub servings: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Sun".
    pub weekday: String,
    pub is_today: bool,
    pub entries: Vec<EntrySummary>,
}

/// Seven consecutive day cells starting at the configured week start.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// e.g. "March 10 - March 16, 2024"
    pub label: String,
    pub days: Vec<DayCell>,
}
