use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

use backend_domain::{InventoryRecord, Person, PersonId, PersonRepository, RecordRepository};

use crate::utils::now_rfc3339;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("person '{0}' already exists")]
    DuplicatePerson(String),
    #[error("person name is empty")]
    EmptyPersonName,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    next_person_id: u64,
    #[serde(default)]
    records: BTreeMap<String, InventoryRecord>,
}

/// People and records kept in one JSON document. Every mutation is applied
/// to a copy, flushed, then swapped in, so a failed write leaves the
/// in-memory view unchanged.
pub struct JsonFileStore {
    path: Option<PathBuf>,
    data: RwLock<StoreData>,
}

impl JsonFileStore {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(StoreData::default()),
        }
    }

    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                StoreData::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            StoreData::default()
        };
        info!(
            "opened store {}: {} records, {} people",
            path.display(),
            data.records.len(),
            data.people.len()
        );
        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    async fn persist(&self, data: &StoreData) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(data)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, path).await?;
        Ok(())
    }

    async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut StoreData) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut guard = self.data.write().await;
        let mut next = guard.clone();
        let out = apply(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl PersonRepository for JsonFileStore {
    async fn list_people(&self) -> anyhow::Result<Vec<Person>> {
        let data = self.data.read().await;
        let mut people = data.people.clone();
        people.sort_by_key(|person| person.id);
        Ok(people)
    }

    async fn get_person(&self, id: PersonId) -> anyhow::Result<Option<Person>> {
        let data = self.data.read().await;
        Ok(data.people.iter().find(|person| person.id == id).cloned())
    }

    async fn find_person_by_name(&self, name: &str) -> anyhow::Result<Option<Person>> {
        let data = self.data.read().await;
        Ok(data
            .people
            .iter()
            .find(|person| person.matches_name(name))
            .cloned())
    }

    async fn add_person(&self, name: &str) -> anyhow::Result<Person> {
        let name = name.trim().to_string();
        self.mutate(move |data| {
            if name.is_empty() {
                return Err(StoreError::EmptyPersonName.into());
            }
            if data.people.iter().any(|person| person.matches_name(&name)) {
                return Err(StoreError::DuplicatePerson(name).into());
            }
            let highest = data
                .people
                .iter()
                .map(|person| person.id.0)
                .max()
                .unwrap_or(0);
            data.next_person_id = data.next_person_id.max(highest) + 1;
            let person = Person {
                id: PersonId(data.next_person_id),
                name,
            };
            data.people.push(person.clone());
            Ok(person)
        })
        .await
    }

    async fn delete_person(&self, id: PersonId) -> anyhow::Result<bool> {
        self.mutate(|data| {
            let before = data.people.len();
            data.people.retain(|person| person.id != id);
            Ok(data.people.len() != before)
        })
        .await
    }
}

#[async_trait]
impl RecordRepository for JsonFileStore {
    async fn get_record(&self, id: &str) -> anyhow::Result<Option<InventoryRecord>> {
        Ok(self.data.read().await.records.get(id).cloned())
    }

    async fn upsert_record(&self, mut record: InventoryRecord) -> anyhow::Result<()> {
        if record.saved_at.is_none() {
            record.saved_at = Some(now_rfc3339());
        }
        self.mutate(move |data| {
            data.records.insert(record.id.clone(), record);
            Ok(())
        })
        .await
    }

    async fn list_records(&self) -> anyhow::Result<Vec<InventoryRecord>> {
        Ok(self.data.read().await.records.values().cloned().collect())
    }

    async fn delete_record(&self, id: &str) -> anyhow::Result<bool> {
        self.mutate(|data| Ok(data.records.remove(id).is_some()))
            .await
    }

    async fn clear_records(&self) -> anyhow::Result<()> {
        self.mutate(|data| {
            data.records.clear();
            Ok(())
        })
        .await
    }
}
