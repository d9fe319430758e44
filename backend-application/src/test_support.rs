use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::Mutex;

use backend_domain::{
    ExportRow, InventoryRecord, Person, PersonId, PersonRepository, RawRow, RecordRepository,
    RuntimeConfig, SheetFormat, SpreadsheetCodec,
};

use crate::{AppState, Metrics};

#[derive(Default)]
struct MemoryData {
    people: Vec<Person>,
    next_person_id: u64,
    records: BTreeMap<String, InventoryRecord>,
}

#[derive(Default)]
pub struct MemoryRepo {
    data: Mutex<MemoryData>,
    failing_record_ids: HashSet<String>,
    failing_person_names: HashSet<String>,
}

impl MemoryRepo {
    pub fn failing_records(ids: &[&str]) -> Self {
        Self {
            failing_record_ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_people(names: &[&str]) -> Self {
        Self {
            failing_person_names: names.iter().map(|name| name.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PersonRepository for MemoryRepo {
    async fn list_people(&self) -> anyhow::Result<Vec<Person>> {
        Ok(self.data.lock().await.people.clone())
    }

    async fn get_person(&self, id: PersonId) -> anyhow::Result<Option<Person>> {
        let data = self.data.lock().await;
        Ok(data.people.iter().find(|person| person.id == id).cloned())
    }

    async fn find_person_by_name(&self, name: &str) -> anyhow::Result<Option<Person>> {
        let data = self.data.lock().await;
        Ok(data
            .people
            .iter()
            .find(|person| person.matches_name(name))
            .cloned())
    }

    async fn add_person(&self, name: &str) -> anyhow::Result<Person> {
        if self.failing_person_names.contains(name) {
            return Err(anyhow!("injected failure for '{}'", name));
        }
        let mut data = self.data.lock().await;
        if data.people.iter().any(|person| person.matches_name(name)) {
            return Err(anyhow!("person '{}' already exists", name));
        }
        data.next_person_id += 1;
        let person = Person {
            id: PersonId(data.next_person_id),
            name: name.to_string(),
        };
        data.people.push(person.clone());
        Ok(person)
    }

    async fn delete_person(&self, id: PersonId) -> anyhow::Result<bool> {
        let mut data = self.data.lock().await;
        let before = data.people.len();
        data.people.retain(|person| person.id != id);
        Ok(data.people.len() != before)
    }
}

#[async_trait]
impl RecordRepository for MemoryRepo {
    async fn get_record(&self, id: &str) -> anyhow::Result<Option<InventoryRecord>> {
        Ok(self.data.lock().await.records.get(id).cloned())
    }

    async fn upsert_record(&self, record: InventoryRecord) -> anyhow::Result<()> {
        if self.failing_record_ids.contains(&record.id) {
            return Err(anyhow!("injected failure for '{}'", record.id));
        }
        self.data
            .lock()
            .await
            .records
            .insert(record.id.clone(), record);
        Ok(())
    }

    async fn list_records(&self) -> anyhow::Result<Vec<InventoryRecord>> {
        Ok(self.data.lock().await.records.values().cloned().collect())
    }

    async fn delete_record(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.data.lock().await.records.remove(id).is_some())
    }

    async fn clear_records(&self) -> anyhow::Result<()> {
        self.data.lock().await.records.clear();
        Ok(())
    }
}

/// Codec that hands back fixed rows and renders exports as one line per row.
#[derive(Default)]
pub struct FixedCodec {
    pub rows: Vec<RawRow>,
}

impl SpreadsheetCodec for FixedCodec {
    fn read_rows(&self, _bytes: &[u8], _format: SheetFormat) -> anyhow::Result<Vec<RawRow>> {
        Ok(self.rows.clone())
    }

    fn write_workbook(&self, rows: &[ExportRow]) -> anyhow::Result<Vec<u8>> {
        let lines = rows
            .iter()
            .map(|row| format!("{}|{}|{}|{}", row.id, row.name, row.person_name, row.entry_date))
            .collect::<Vec<_>>();
        Ok(lines.join("\n").into_bytes())
    }
}

pub fn state_with(repo: MemoryRepo, codec: FixedCodec) -> AppState {
    let repo = Arc::new(repo);
    AppState {
        config: RuntimeConfig {
            default_people: vec![
                "Quản lý".to_string(),
                "Nhân viên 1".to_string(),
                "Nhân viên 2".to_string(),
            ],
            ..RuntimeConfig::default()
        },
        person_repo: repo.clone(),
        record_repo: repo,
        codec: Arc::new(codec),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn test_state() -> AppState {
    state_with(MemoryRepo::default(), FixedCodec::default())
}
