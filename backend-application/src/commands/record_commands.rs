use tracing::info;

use crate::commands::person_commands;
use crate::{AppError, AppState};
use backend_domain::{InventoryRecord, RecordDraft, DEFAULT_PRICE, DEFAULT_QUANTITY};

pub async fn save_record(
    state: &AppState,
    draft: RecordDraft,
) -> Result<InventoryRecord, AppError> {
    let id = draft.id.trim().to_string();
    if id.is_empty() {
        return Err(AppError::BadRequest("record id is required".to_string()));
    }
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest(format!("name is required for '{}'", id)));
    }
    let person_id = draft
        .person_id
        .ok_or_else(|| AppError::BadRequest(format!("person is required for '{}'", id)))?;
    if state.person_repo.get_person(person_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "unknown person {} for '{}'",
            person_id, id
        )));
    }

    let quantity = draft
        .quantity
        .filter(|value| *value >= 1)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
        .unwrap_or(DEFAULT_QUANTITY);
    let price = draft
        .price
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(DEFAULT_PRICE);
    let entry_timestamp = draft
        .entry_timestamp
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let record = InventoryRecord {
        id,
        name,
        brand: draft.brand.trim().to_string(),
        unit: draft.unit.trim().to_string(),
        quantity,
        price,
        color: draft.color.trim().to_string(),
        size: draft.size.trim().to_string(),
        shape: draft.shape.trim().to_string(),
        notes: draft.notes,
        entry_timestamp,
        person_id: Some(person_id),
        saved_at: None,
    };
    state.record_repo.upsert_record(record.clone()).await?;
    info!("record saved: id={}", record.id);
    let stored = state.record_repo.get_record(&record.id).await?;
    Ok(stored.unwrap_or(record))
}

pub async fn delete_record(state: &AppState, id: &str) -> Result<(), AppError> {
    if !state.record_repo.delete_record(id.trim()).await? {
        return Err(AppError::NotFound(format!("record '{}'", id)));
    }
    info!("record deleted: id={}", id);
    Ok(())
}

/// Removes every record, then restores the default people if none remain.
pub async fn clear_records(state: &AppState) -> Result<(), AppError> {
    state.record_repo.clear_records().await?;
    info!("all records cleared");
    person_commands::seed_default_people(state).await?;
    Ok(())
}
