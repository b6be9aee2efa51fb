use chrono::NaiveDate;
use serde::Serialize;

use crate::{db::DocumentStore, models::menu::Menu, services::menu::MenuService};

/// A confirmed choice: plan `menu_id` onto `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedMenu {
    pub date: NaiveDate,
    pub menu_id: String,
}

/// The add-menu overlay: loads every menu on open, filters client side and
/// allows one selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPicker {
    date: NaiveDate,
    menus: Vec<Menu>,
    search: String,
    selected: Option<String>,
    loading: bool,
}

impl MenuPicker {
    /// Fetch the menu list. A failed fetch is logged by the service and
    /// leaves the picker empty.
    pub async fn open(store: &dyn DocumentStore, date: NaiveDate) -> Self {
        let mut picker = Self::loading(date);
        picker.menus = MenuService::list(store).await.unwrap_or_default();
        picker.loading = false;
        picker
    }

    pub fn loading(date: NaiveDate) -> Self {
        Self {
            date,
            menus: Vec::new(),
            search: String::new(),
            selected: None,
            loading: true,
        }
    }

    pub fn with_menus(date: NaiveDate, menus: Vec<Menu>) -> Self {
        Self {
            menus,
            loading: false,
            ..Self::loading(date)
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn filtered(&self) -> Vec<&Menu> {
        MenuService::filter(&self.menus, &self.search)
    }

    /// "No menus match your search" versus "No menus available".
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.filtered().is_empty() {
            return None;
        }
        if self.search.is_empty() {
            Some("No menus available")
        } else {
            Some("No menus match your search")
        }
    }

    /// Select a loaded menu; unknown ids are ignored.
    pub fn select(&mut self, menu_id: &str) -> bool {
        if self.menus.iter().any(|menu| menu.id == menu_id) {
            self.selected = Some(menu_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn can_confirm(&self) -> bool {
        self.selected.is_some()
    }

    /// Emit the chosen pair and close the picker. `None` until a menu is selected.
    pub fn confirm(self) -> Option<PickedMenu> {
        let date = self.date;
        self.selected.map(|menu_id| PickedMenu { date, menu_id })
    }
}
