use tracing::{info, warn};

use crate::{AppError, AppState};
use backend_domain::{
    normalize_rows, resolve_people, ImportSummary, PersonDirectory, RawRow, SheetFormat,
};

/// Decodes a spreadsheet and imports its rows.
pub async fn import_spreadsheet(
    state: &AppState,
    bytes: &[u8],
    format: SheetFormat,
) -> Result<ImportSummary, AppError> {
    let rows = state
        .codec
        .read_rows(bytes, format)
        .map_err(|err| AppError::BadRequest(format!("cannot read spreadsheet: {}", err)))?;
    import_rows(state, rows).await
}

/// Normalizes rows, registers unknown people, then persists each record on
/// its own. Per-record failures are counted rather than aborting the batch.
pub async fn import_rows(state: &AppState, rows: Vec<RawRow>) -> Result<ImportSummary, AppError> {
    if rows.is_empty() {
        return Err(AppError::BadRequest("spreadsheet contains no rows".to_string()));
    }

    let people = state.person_repo.list_people().await?;
    let mut directory = PersonDirectory::from_people(&people);
    let batch = normalize_rows(&rows, &directory);
    let mut summary = ImportSummary {
        skipped: batch.skipped,
        ..ImportSummary::default()
    };
    if batch.skipped > 0 {
        warn!("dropped {} import rows without id or name", batch.skipped);
    }

    if !batch.unknown_people.is_empty() {
        for name in &batch.unknown_people {
            match state.person_repo.add_person(name).await {
                Ok(person) => {
                    summary.people_added += 1;
                    info!("registered person from import: id={}, name={}", person.id, person.name);
                }
                Err(err) => {
                    warn!("person '{}' already exists or could not be added: {}", name, err);
                }
            }
        }
        let people = state.person_repo.list_people().await?;
        directory = PersonDirectory::from_people(&people);
    }

    for record in resolve_people(batch.pending, &directory) {
        let id = record.id.clone();
        match state.record_repo.upsert_record(record).await {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                warn!("failed to save imported record '{}': {}", id, err);
                summary.failed += 1;
            }
        }
    }

    state.metrics.record_import(&summary);
    info!(
        "import finished: succeeded={}, failed={}, skipped={}, people_added={}",
        summary.succeeded, summary.failed, summary.skipped, summary.people_added
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state_with, test_state, FixedCodec, MemoryRepo};
    use backend_domain::PersonId;

    fn row(id: &str, name: &str, person: &str) -> RawRow {
        RawRow::new()
            .with_cell("Mã Sản Phẩm", id)
            .with_cell("Tên Sản Phẩm", name)
            .with_cell("Người Nhập", person)
    }

    #[tokio::test]
    async fn unknown_person_is_registered_once_and_assigned() {
        let state = test_state();
        state.person_repo.add_person("Quản lý").await.expect("seed");

        let summary = import_rows(
            &state,
            vec![row("1", "Bút", "Lan"), row("2", "Thước", "lan"), row("3", "Tẩy", "quản lý")],
        )
        .await
        .expect("import");
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.people_added, 1);

        let people = state.person_repo.list_people().await.expect("people");
        let lan = people
            .iter()
            .filter(|person| person.name.to_lowercase() == "lan")
            .collect::<Vec<_>>();
        assert_eq!(lan.len(), 1);
        assert_eq!(lan[0].name, "Lan");

        for id in ["1", "2"] {
            let record = state.record_repo.get_record(id).await.expect("get").expect("record");
            assert_eq!(record.person_id, Some(lan[0].id));
        }
        let record = state.record_repo.get_record("3").await.expect("get").expect("record");
        assert_eq!(record.person_id, Some(PersonId(1)));
    }

    #[tokio::test]
    async fn later_rows_replace_earlier_ones_with_same_id() {
        let state = test_state();
        let rows = vec![
            RawRow::new()
                .with_cell("Barcode", "42")
                .with_cell("Name", "old")
                .with_cell("Qty", 1.0),
            RawRow::new()
                .with_cell("Barcode", "42")
                .with_cell("Name", "new")
                .with_cell("Qty", 9.0),
        ];
        let summary = import_rows(&state, rows).await.expect("import");
        assert_eq!(summary.succeeded, 2);
        let records = state.record_repo.list_records().await.expect("list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "new");
        assert_eq!(records[0].quantity, 9);
    }

    #[tokio::test]
    async fn save_failures_are_counted_not_fatal() {
        let state = state_with(MemoryRepo::failing_records(&["2"]), FixedCodec::default());
        let summary = import_rows(
            &state,
            vec![row("1", "a", ""), row("2", "b", ""), row("", "c", "")],
        )
        .await
        .expect("import");
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn person_registration_failure_leaves_record_unassigned() {
        let state = state_with(MemoryRepo::failing_people(&["Lan"]), FixedCodec::default());
        let summary = import_rows(&state, vec![row("1", "a", "Lan")])
            .await
            .expect("import");
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.people_added, 0);
        let record = state.record_repo.get_record("1").await.expect("get").expect("record");
        assert_eq!(record.person_id, None);
    }

    #[tokio::test]
    async fn skipped_row_does_not_register_its_person() {
        let state = test_state();
        let summary = import_rows(
            &state,
            vec![row("", "không mã", "Hoa"), row("1", "Bút", "Lan")],
        )
        .await
        .expect("import");
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.people_added, 1);
        let people = state.person_repo.list_people().await.expect("people");
        assert!(people.iter().any(|person| person.name == "Lan"));
        assert!(!people.iter().any(|person| person.name == "Hoa"));
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let state = test_state();
        let err = import_rows(&state, Vec::new()).await.expect_err("empty");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn spreadsheet_rows_come_from_codec() {
        let codec = FixedCodec {
            rows: vec![RawRow::new()
                .with_cell("Code", "7")
                .with_cell("Product Name", "Ly")
                .with_cell("Entry Date", "2023/05/10 14:30")],
        };
        let state = state_with(MemoryRepo::default(), codec);
        let summary = import_spreadsheet(&state, b"ignored", SheetFormat::Xlsx)
            .await
            .expect("import");
        assert_eq!(summary.succeeded, 1);
        let record = state.record_repo.get_record("7").await.expect("get").expect("record");
        assert_eq!(record.entry_timestamp.as_deref(), Some("2023-05-10T14:30"));
    }
}
