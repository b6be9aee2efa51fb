use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{api_error, internal, today, ApiError};
use crate::{
    models::calendar::{CalendarEntry, CreateEntryRequest, WeekQuery, WeekView},
    services::calendar::{CalendarError, CalendarService},
    AppState,
};

/// GET /api/calendar?date=YYYY-MM-DD: the seven day cells of the week
/// containing `date` (today when omitted).
pub async fn get_week(
    State(state): State<AppState>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<WeekView>, ApiError> {
    let entries = CalendarService::load_entries(state.store.as_ref())
        .await
        .map_err(internal)?;
    let pivot = params.date.unwrap_or_else(today);
    CalendarService::week_view(&entries, pivot, state.config.week_start, today())
        .map(Json)
        .map_err(calendar_error)
}

/// GET /api/calendar/entries: every entry whose menu still exists.
pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalendarEntry>>, ApiError> {
    CalendarService::load_entries(state.store.as_ref())
        .await
        .map(Json)
        .map_err(internal)
}

/// POST /api/calendar/entries
pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CalendarEntry>), ApiError> {
    CalendarService::add_entry_from_str(state.store.as_ref(), &body.date, &body.menu_id)
        .await
        .map(|entry| (StatusCode::CREATED, Json(entry)))
        .map_err(calendar_error)
}

/// DELETE /api/calendar/entries/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    CalendarService::delete_entry(state.store.as_ref(), &id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(internal)
}

pub(super) fn calendar_error(e: CalendarError) -> ApiError {
    match e {
        CalendarError::InvalidDate(_) => api_error(StatusCode::BAD_REQUEST, e),
        CalendarError::MenuNotFound(_) => api_error(StatusCode::NOT_FOUND, e),
        CalendarError::Store(_) => internal(e),
    }
}
