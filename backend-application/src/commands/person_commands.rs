use tracing::{info, warn};

use crate::{AppError, AppState};
use backend_domain::{Person, PersonId, PersonPayload};

pub async fn add_person(state: &AppState, payload: PersonPayload) -> Result<Person, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("person name is required".to_string()));
    }
    if state.person_repo.find_person_by_name(name).await?.is_some() {
        return Err(AppError::Conflict(format!("person '{}' already exists", name)));
    }
    let person = state.person_repo.add_person(name).await?;
    info!("person added: id={}, name={}", person.id, person.name);
    Ok(person)
}

pub async fn delete_person(state: &AppState, id: PersonId) -> Result<(), AppError> {
    if state.person_repo.get_person(id).await?.is_none() {
        return Err(AppError::NotFound(format!("person {}", id)));
    }
    let in_use = state
        .record_repo
        .list_records()
        .await?
        .iter()
        .any(|record| record.person_id == Some(id));
    if in_use {
        return Err(AppError::Conflict(format!(
            "person {} is referenced by inventory records",
            id
        )));
    }
    state.person_repo.delete_person(id).await?;
    info!("person deleted: id={}", id);
    Ok(())
}

/// Registers the configured default people when none exist yet.
pub async fn seed_default_people(state: &AppState) -> Result<usize, AppError> {
    if !state.person_repo.list_people().await?.is_empty() {
        return Ok(0);
    }
    let mut added = 0;
    for name in &state.config.default_people {
        match state.person_repo.add_person(name).await {
            Ok(_) => added += 1,
            Err(err) => warn!("failed to seed default person '{}': {}", name, err),
        }
    }
    if added > 0 {
        info!("seeded {} default people", added);
    }
    Ok(added)
}
