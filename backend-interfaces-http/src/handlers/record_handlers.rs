use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::record_commands;
use backend_application::queries::record_queries;
use backend_application::AppState;
use backend_domain::{InventoryRecord, RecordDraft, RecordListQuery};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RecordListQuery>,
) -> Result<Json<Vec<InventoryRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let records = record_queries::list_records(&state, query).await?;
    Ok(Json(records))
}

pub async fn get_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<InventoryRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let record = record_queries::get_record(&state, &id).await?;
    Ok(Json(record))
}

pub async fn save_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut draft): Json<RecordDraft>,
) -> Result<Json<InventoryRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    if draft.id.trim().is_empty() {
        draft.id = id.clone();
    }
    if draft.id.trim() != id.trim() {
        return Err(HttpError::BadRequest(format!(
            "body id '{}' does not match path id '{}'",
            draft.id, id
        )));
    }
    let record = record_commands::save_record(&state, draft).await?;
    Ok(Json(record))
}

pub async fn delete_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    record_commands::delete_record(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_records(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    record_commands::clear_records(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}
