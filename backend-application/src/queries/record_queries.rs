use std::collections::HashMap;

use crate::{AppError, AppState};
use backend_domain::{
    format_entry_date, parse_entry_timestamp, InventoryRecord, PersonId, RecordListQuery,
};

pub async fn get_record(state: &AppState, id: &str) -> Result<InventoryRecord, AppError> {
    state
        .record_repo
        .get_record(id.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("record '{}'", id)))
}

/// Lists records newest entry first, optionally filtered by a
/// case-insensitive search over the displayed columns.
pub async fn list_records(
    state: &AppState,
    query: RecordListQuery,
) -> Result<Vec<InventoryRecord>, AppError> {
    let limit = query.limit.unwrap_or(1000).clamp(1, 1000);
    let search = query.search.unwrap_or_default().trim().to_lowercase();

    let people = state
        .person_repo
        .list_people()
        .await?
        .into_iter()
        .map(|person| (person.id, person.name))
        .collect::<HashMap<_, _>>();

    let mut records = state.record_repo.list_records().await?;
    records.sort_by(|a, b| {
        let a_key = a.entry_timestamp.as_deref().and_then(parse_entry_timestamp);
        let b_key = b.entry_timestamp.as_deref().and_then(parse_entry_timestamp);
        b_key.cmp(&a_key)
    });

    Ok(records
        .into_iter()
        .filter(|record| search.is_empty() || matches_search(record, &people, &search))
        .take(limit)
        .collect())
}

fn matches_search(
    record: &InventoryRecord,
    people: &HashMap<PersonId, String>,
    needle: &str,
) -> bool {
    let person_name = record
        .person_id
        .and_then(|id| people.get(&id))
        .map(String::as_str)
        .unwrap_or("");
    let entry = record.entry_timestamp.as_deref().unwrap_or("");
    let quantity = record.quantity.to_string();
    let price = record.price.to_string();
    let formatted_entry = format_entry_date(entry);
    let fields: [&str; 9] = [
        &record.id,
        &record.name,
        &record.brand,
        &record.unit,
        &quantity,
        &price,
        person_name,
        entry,
        &formatted_entry,
    ];
    fields
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}
