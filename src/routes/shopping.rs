use axum::{
    extract::{Query, State},
    Json,
};

use super::{calendar::calendar_error, today, ApiError};
use crate::{
    models::calendar::WeekQuery,
    services::shopping::{ShoppingList, ShoppingService},
    AppState,
};

/// GET /api/shopping?date=YYYY-MM-DD: ingredients for the week containing `date`.
pub async fn get_week(
    State(state): State<AppState>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<ShoppingList>, ApiError> {
    let pivot = params.date.unwrap_or_else(today);
    ShoppingService::for_week(state.store.as_ref(), pivot, state.config.week_start)
        .await
        .map(Json)
        .map_err(calendar_error)
}
