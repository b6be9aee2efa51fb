use serde::Serialize;

use crate::{
    db::DocumentStore,
    models::menu::MenuDetails,
    services::menu::{MenuLookupError, MenuService},
};

/// State of the menu details page. A page starts out `Loading` and
/// [`MenuDetailsState::load`] always settles it; unknown ids end in
/// `NotFound` rather than an endless loading state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MenuDetailsState {
    #[default]
    Loading,
    Ready { menu: MenuDetails },
    NotFound { id: String },
    Failed { message: String },
}

impl MenuDetailsState {
    pub async fn fetch(store: &dyn DocumentStore, id: &str) -> Self {
        match MenuService::details(store, id).await {
            Ok(menu) => Self::Ready { menu },
            Err(MenuLookupError::NotFound(id)) => Self::NotFound { id },
            Err(MenuLookupError::Store(e)) => Self::Failed {
                message: e.to_string(),
            },
        }
    }

    /// Settle a page on the outcome of fetching menu `id`.
    pub async fn load(&mut self, store: &dyn DocumentStore, id: &str) {
        *self = Self::fetch(store, id).await;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
