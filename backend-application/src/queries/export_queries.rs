use std::collections::HashMap;

use chrono::Local;
use tracing::info;

use crate::{AppError, AppState};
use backend_domain::{export_file_name, to_export_row, ExportRow};

#[derive(Debug)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub row_count: usize,
}

pub async fn build_export_rows(state: &AppState) -> Result<Vec<ExportRow>, AppError> {
    let records = state.record_repo.list_records().await?;
    if records.is_empty() {
        return Err(AppError::BadRequest("no records to export".to_string()));
    }
    let people = state
        .person_repo
        .list_people()
        .await?
        .into_iter()
        .map(|person| (person.id, person.name))
        .collect::<HashMap<_, _>>();
    Ok(records
        .iter()
        .map(|record| {
            let person_name = record
                .person_id
                .and_then(|id| people.get(&id))
                .map(String::as_str);
            to_export_row(record, person_name)
        })
        .collect())
}

pub async fn export_workbook(state: &AppState) -> Result<ExportFile, AppError> {
    let rows = build_export_rows(state).await?;
    let bytes = state.codec.write_workbook(&rows)?;
    let file_name = export_file_name(
        &state.config.export_file_prefix,
        Local::now().naive_local(),
    );
    state.metrics.record_export();
    info!("exported {} records as {}", rows.len(), file_name);
    Ok(ExportFile {
        file_name,
        bytes,
        row_count: rows.len(),
    })
}
