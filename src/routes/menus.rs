use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use super::{internal, ApiError};
use crate::{
    models::menu::{Menu, MenuDetails, MenuSearchQuery},
    services::menu::MenuService,
    views::menu_details::MenuDetailsState,
    AppState,
};

/// GET /api/menus?q=term: menu picker listing, filtered on menu name,
/// description and recipe names.
pub async fn list_menus(
    State(state): State<AppState>,
    Query(params): Query<MenuSearchQuery>,
) -> Result<Json<Vec<Menu>>, ApiError> {
    let menus = MenuService::list(state.store.as_ref()).await.map_err(internal)?;
    let term = params.q.unwrap_or_default();
    let filtered: Vec<Menu> = MenuService::filter(&menus, &term)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(filtered))
}

/// GET /api/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MenuDetails>, ApiError> {
    let mut page = MenuDetailsState::default();
    page.load(state.store.as_ref(), &id).await;
    match page {
        MenuDetailsState::Ready { menu } => Ok(Json(menu)),
        MenuDetailsState::NotFound { id } => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Menu {id} not found"), "state": "not_found" })),
        )),
        MenuDetailsState::Failed { message } => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message, "state": "failed" })),
        )),
        MenuDetailsState::Loading => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "menu details still loading", "state": "loading" })),
        )),
    }
}
