use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::person_commands;
use backend_application::queries::person_queries;
use backend_application::AppState;
use backend_domain::{Person, PersonId, PersonPayload};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_people(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Person>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let people = person_queries::list_people(&state).await?;
    Ok(Json(people))
}

pub async fn add_person(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PersonPayload>,
) -> Result<(StatusCode, Json<Person>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let person = person_commands::add_person(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

pub async fn delete_person(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    person_commands::delete_person(&state, PersonId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
