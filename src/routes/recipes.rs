use axum::{extract::State, Json};

use super::{internal, ApiError};
use crate::{models::recipe::Recipe, services::recipes::RecipeService, AppState};

/// GET /api/recipes
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    RecipeService::list(state.store.as_ref())
        .await
        .map(Json)
        .map_err(internal)
}
